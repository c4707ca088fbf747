use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fundpool_ledger::{FundingLedger, Settlement, SettlementError};
use fundpool_oracle::{OracleError, PriceQuote, PriceSource};
use fundpool_types::{AccountAddress, NativeAmount};

struct FixedPrice;

impl PriceSource for FixedPrice {
    fn latest_price(&self) -> Result<PriceQuote, OracleError> {
        Ok(PriceQuote {
            price: 2000_00000000,
            decimals: 8,
        })
    }
    fn name(&self) -> &str {
        "fixed"
    }
}

struct AcceptAll;

impl Settlement for AcceptAll {
    fn transfer(
        &self,
        _recipient: &AccountAddress,
        _amount: NativeAmount,
    ) -> Result<(), SettlementError> {
        Ok(())
    }
}

fn address(n: u32) -> AccountAddress {
    AccountAddress::new(format!("0x{n:0>40x}"))
}

fn owner() -> AccountAddress {
    address(u32::MAX)
}

fn funded_ledger(funders: u32) -> FundingLedger {
    let mut ledger = FundingLedger::new(owner(), Box::new(FixedPrice), Box::new(AcceptAll));
    for n in 0..funders {
        ledger
            .contribute(&address(n), NativeAmount::from_native(1))
            .expect("contribution accepted");
    }
    ledger
}

fn bench_withdraw_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("withdraw");

    for funder_count in [5, 50, 500] {
        group.bench_with_input(
            BenchmarkId::new("walking", funder_count),
            &funder_count,
            |b, &n| {
                b.iter_batched(
                    || funded_ledger(n),
                    |mut ledger| black_box(ledger.withdraw(&owner())).unwrap(),
                    criterion::BatchSize::SmallInput,
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("buffered", funder_count),
            &funder_count,
            |b, &n| {
                b.iter_batched(
                    || funded_ledger(n),
                    |mut ledger| black_box(ledger.withdraw_buffered(&owner())).unwrap(),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_withdraw_variants);
criterion_main!(benches);
