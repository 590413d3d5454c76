//! # Genesis-Forge Benchmarks
//!
//! | Area | Measured |
//! |------|----------|
//! | gf-02 trie commit | sorted build over N keys |
//! | gf-02 state commitment | accounts with storage |
//! | gf-04 construction | raw JSON to header, ephemeral store |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gf_01_commitment_store::{CommitmentStore, StoreMode};
use gf_02_state_commitment::{commit, StateCommitmentBuilder};
use gf_04_genesis_service::GenesisService;
use gf_tests::integration::fixtures;
use shared_types::{keccak256, AccountState, Address, GenesisAlloc, H256, U256};
use std::time::Duration;

fn bench_trie_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("gf-02-trie-commit");
    group.measurement_time(Duration::from_secs(10));

    for size in [100u64, 1_000, 10_000] {
        let entries: Vec<(H256, Vec<u8>)> = (0..size)
            .map(|i| (keccak256(i.to_be_bytes()), rlp::encode(&U256::from(i + 1)).to_vec()))
            .collect();

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("commit", size), &entries, |b, entries| {
            b.iter(|| black_box(commit(entries.iter().cloned()).map(|t| t.root)))
        });
    }
    group.finish();
}

fn bench_state_commitment(c: &mut Criterion) {
    let mut group = c.benchmark_group("gf-02-state-commitment");

    let alloc: GenesisAlloc = (1..=200u64)
        .map(|i| {
            let mut account = AccountState::with_balance(U256::from(i));
            for slot in 0..16u64 {
                account
                    .storage
                    .insert(H256::from_low_u64_be(slot), H256::from_low_u64_be(i * slot + 1));
            }
            (Address::from_low_u64_be(i), account)
        })
        .collect();

    group.bench_function("build_200_accounts_16_slots", |b| {
        b.iter(|| {
            let store = CommitmentStore::open_ephemeral();
            let root = StateCommitmentBuilder::new().build(&alloc, &store).map(|c| c.root);
            store.discard();
            black_box(root)
        })
    });
    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("gf-04-construction");
    let service = GenesisService::new();

    for count in [1u64, 100, 1_000] {
        let raw = fixtures::to_bytes(&fixtures::many_accounts(count));
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("construct", count), &raw, |b, raw| {
            b.iter(|| black_box(service.construct(raw, &StoreMode::Ephemeral).map(|h| h.hash)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_trie_commit,
    bench_state_commitment,
    bench_construction
);
criterion_main!(benches);
