// Shared table and corpus generators for the benches.
#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};
use thainum::{BackingStore, Engine, JsonStore, MemoryStore, PairClass, PairMeaning, ReferenceTables};

const CLASSES: [PairClass; 7] = [
    PairClass::D10,
    PairClass::D8,
    PairClass::D5,
    PairClass::Neutral,
    PairClass::R5,
    PairClass::R7,
    PairClass::R10,
];

const CONSONANTS: &[char] = &[
    'ก', 'ข', 'ค', 'ง', 'จ', 'ช', 'ด', 'ต', 'ท', 'น', 'บ', 'ป', 'พ', 'ม', 'ย', 'ร', 'ล', 'ว', 'ส',
    'ห', 'อ',
];
const TRAILING: &[char] = &['า', 'ิ', 'ี', 'ุ', 'ู', 'ั', '่', '้'];
const LEADING: &[char] = &['เ', 'แ', 'โ', 'ไ'];

fn bundled<T>(read: impl FnOnce(&JsonStore) -> Result<Vec<T>, thainum::StoreError>) -> Vec<T> {
    let data = JsonStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
    match read(&data) {
        Ok(rows) => rows,
        Err(e) => panic!("bundled data failed to load: {e}"),
    }
}

/// The bundled scheme and klakini tables without a corpus; every two-digit
/// pair gets a generated meaning so scores spread over all classes.
pub fn store() -> MemoryStore {
    MemoryStore {
        scheme_a: bundled(JsonStore::read_scheme_a),
        scheme_b: bundled(JsonStore::read_scheme_b),
        day_forbidden: bundled(JsonStore::read_day_forbidden),
        pair_meanings: (0..100)
            .map(|n| {
                let class = CLASSES[n % CLASSES.len()];
                PairMeaning {
                    class,
                    pair_score: match class {
                        PairClass::D10 => 100,
                        PairClass::D8 => 80,
                        PairClass::D5 => 50,
                        PairClass::R5 => -50,
                        PairClass::R7 => -70,
                        PairClass::R10 => -100,
                        PairClass::Neutral => 0,
                    },
                    category: ["การงาน", "การเงิน", "ความรัก", "สุขภาพ"][n % 4].to_owned(),
                    ..PairMeaning::neutral(format!("{n:02}"))
                }
            })
            .collect(),
        corpus: Vec::new(),
    }
}

/// Pronounceable-looking Thai names of 2–5 syllables.
pub fn random_names(seed: u64, count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let syllables = rng.random_range(2..=5);
            let mut name = String::new();
            for _ in 0..syllables {
                if rng.random_bool(0.2) {
                    name.push(LEADING[rng.random_range(0..LEADING.len())]);
                }
                name.push(CONSONANTS[rng.random_range(0..CONSONANTS.len())]);
                if rng.random_bool(0.6) {
                    name.push(TRAILING[rng.random_range(0..TRAILING.len())]);
                }
            }
            name
        })
        .collect()
}

/// A store whose corpus holds `count` profiled random names.
pub fn store_with_corpus(seed: u64, count: usize) -> MemoryStore {
    let mut store = store();
    let profiler = Engine::new(store.clone());
    store.corpus = random_names(seed, count)
        .iter()
        .enumerate()
        .filter_map(|(id, name)| profiler.profile(id as u64 + 1, name).ok())
        .collect();
    store
}

pub fn warm_engine(store: MemoryStore) -> Engine {
    match ReferenceTables::load(&store) {
        Ok(tables) => Engine::from(tables),
        Err(e) => panic!("bench tables failed to load: {e}"),
    }
}
