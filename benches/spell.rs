use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::str::FromStr;
use worddice::{LetterSet, Network};

// The classic 13 Boggle-ish dice from the course assignment this models.
const DICE: [&str; 13] = [
    "ABCDEF", "GHIJKL", "MNOPQR", "STUVWX", "YZABCD", "EFGHIJ", "KLMNOP", "QRSTUV", "WXYZAB",
    "AEIOUY", "BCDFGH", "JKLMNP", "QRSTVW",
];

struct SpellBenchmarkData {
    name: &'static str,
    word: &'static str,
}

fn bm_spell(c: &mut Criterion) {
    let mut group = c.benchmark_group("spell");
    let dice: Vec<LetterSet> = DICE.iter().map(|d| LetterSet::from_str(d).unwrap()).collect();
    let data = [
        SpellBenchmarkData {
            name: "short",
            word: "CAT",
        },
        SpellBenchmarkData {
            name: "long",
            word: "ALGORITHM",
        },
        SpellBenchmarkData {
            name: "unspellable",
            word: "ZIGZAGGED",
        },
    ];
    for d in data.iter() {
        let mut network = Network::with_dice(&dice);
        group.bench_with_input(BenchmarkId::from_parameter(d.name), d.word, |b, word| {
            b.iter(|| network.spell(word));
        });
    }
}

criterion_group!(benches, bm_spell);
criterion_main!(benches);
