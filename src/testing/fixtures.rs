//! A small but internally consistent set of reference tables.
//!
//! Every corpus row was produced from the scheme and klakini tables below, so
//! `Engine::profile` of a corpus text reproduces its row.
use crate::day::Day;
use crate::pair::{PairClass, PairMeaning};
use crate::store::{DayForbiddenRow, MemoryStore, SchemeRow};
use crate::tables::CorpusName;
use std::collections::BTreeMap;

const SCHEME_A: &[(&str, i64)] = &[
    ("กดถทภฤุ่าำ", 1),
    ("ขชงบปเแู้", 2),
    ("ฆตฑฒ๋", 3),
    ("คธญรษะโัิ", 4),
    ("ฉฌณนมหฎฮฬึ", 5),
    ("จลวอใ", 6),
    ("ซศสีื๊", 7),
    ("ยผฝพฟ็", 8),
    ("ฏฐไ์", 9),
];

const VOWELS: &str = "ะัาำิีึืุูเแโใไ";

const SCHEME_B: &[(&str, i64)] = &[
    ("ะัาำิีึืุูเแโใไ็์", 1),
    ("กขคฆง", 2),
    ("จฉชซฌญ", 3),
    ("ฎฏฐฑฒณ", 4),
    ("บปผฝพฟภม", 5),
    ("ศษสหฬอฮ", 6),
    ("ดตถทธน", 7),
    ("ยรลว", 8),
];

const KLAKINI: &[(&str, &str)] = &[
    ("sunday", "ศษสหฬฮ"),
    ("monday", VOWELS),
    ("tuesday", "ดตถทธน"),
    ("wednesday", "บปผฝพฟภม"),
    ("wednesday-night", "กขคฆง"),
    ("thursday", "จฉชซฌญ"),
    ("friday", "ยรลว"),
    ("saturday", "ฎฏฐฑฒณ"),
];

const MEANINGS: &[(&str, PairClass, i64, &str, &str)] = &[
    ("02", PairClass::D5, 50, "ความรัก", "มีเสน่ห์ อ่อนโยน"),
    ("03", PairClass::R5, -50, "สุขภาพ", "ใจร้อน เหนื่อยง่าย"),
    ("12", PairClass::R7, -70, "ความรัก", "ความสัมพันธ์ไม่มั่นคง"),
    ("13", PairClass::R7, -70, "สุขภาพ", "อุบัติเหตุ เจ็บป่วย"),
    ("15", PairClass::D10, 100, "การเงิน", "โชคลาภ เงินทองไหลมา"),
    ("18", PairClass::D8, 80, "การงาน", "ผู้นำ มีอำนาจ"),
    ("19", PairClass::D10, 100, "การเงิน", "ความสำเร็จ ชื่อเสียง"),
    ("22", PairClass::D5, 50, "ความรัก", "ครอบครัวอบอุ่น"),
    ("23", PairClass::D8, 80, "การงาน", "ขยัน ก้าวหน้าในหน้าที่"),
    ("24", PairClass::D10, 100, "การงาน", "เจรจาดี ผู้ใหญ่เมตตา"),
    ("26", PairClass::R5, -50, "สุขภาพ", "พักผ่อนน้อย"),
    ("42", PairClass::D8, 80, "การเงิน", "ค้าขายคล่อง"),
    ("45", PairClass::D5, 50, "ความรัก", "เพื่อนฝูงอุปถัมภ์"),
    ("56", PairClass::R10, -100, "การเงิน", "ทรัพย์รั่วไหล"),
    ("65", PairClass::R10, -100, "การงาน", "ขัดแย้ง ถูกกลั่นแกล้ง"),
];

fn scheme_rows(groups: &[(&str, i64)]) -> Vec<SchemeRow> {
    groups
        .iter()
        .flat_map(|&(chars, value)| chars.chars().map(move |c| SchemeRow::new(c, value)))
        .collect()
}

fn meaning(
    &(pair, class, score, category, description): &(&str, PairClass, i64, &str, &str),
) -> PairMeaning {
    PairMeaning {
        pair: pair.into(),
        class,
        description: description.into(),
        long_description: format!("คู่ {pair}: {description}"),
        pair_score: score,
        category: category.into(),
        keywords: description.split(' ').map(str::to_owned).collect(),
        // stale colors on purpose; the class decides
        color_hex: "#000000".into(),
    }
}

pub(crate) fn corpus_name(
    id: u64,
    text: &str,
    primary: &[(&str, PairClass)],
    shadow: &[(&str, PairClass)],
    forbidden: &[Day],
) -> CorpusName {
    CorpusName {
        id,
        text: text.into(),
        primary_pairs: primary.iter().map(|(p, _)| (*p).to_owned()).collect(),
        shadow_pairs: shadow.iter().map(|(p, _)| (*p).to_owned()).collect(),
        primary_classes: primary.iter().map(|&(_, c)| c).collect(),
        shadow_classes: shadow.iter().map(|&(_, c)| c).collect(),
        forbidden_by_day: Day::ALL
            .into_iter()
            .map(|d| (d, forbidden.contains(&d)))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub(crate) fn sample_corpus() -> Vec<CorpusName> {
    use Day::*;
    use PairClass::*;
    vec![
        corpus_name(8, "สมชาญ", &[("19", D10)], &[("18", D8)], &[Sunday, Monday, Wednesday, Thursday]),
        corpus_name(1, "สมชาย", &[("23", D8)], &[("23", D8)], &[Sunday, Monday, Wednesday, Thursday, Friday]),
        corpus_name(2, "สมชัย", &[("26", R5)], &[("23", D8)], &[Sunday, Monday, Wednesday, Thursday, Friday]),
        corpus_name(3, "สมพร", &[("24", D10)], &[("24", D10)], &[Sunday, Wednesday, Friday]),
        corpus_name(4, "สมชาติ", &[("22", D5)], &[("23", D8)], &[Sunday, Monday, Tuesday, Wednesday, Thursday]),
        corpus_name(5, "สายชล", &[("24", D10)], &[("26", R5)], &[Sunday, Monday, Thursday, Friday]),
        corpus_name(6, "ชาย", &[("11", Neutral)], &[("12", R7)], &[Monday, Thursday, Friday]),
        corpus_name(7, "มานพ", &[("19", D10)], &[("18", D8)], &[Monday, Tuesday, Wednesday]),
    ]
}

pub(crate) fn sample_store() -> MemoryStore {
    MemoryStore {
        scheme_a: scheme_rows(SCHEME_A),
        scheme_b: scheme_rows(SCHEME_B),
        day_forbidden: KLAKINI
            .iter()
            .map(|&(day, chars)| DayForbiddenRow::new(day, chars))
            .collect(),
        pair_meanings: MEANINGS.iter().map(meaning).collect(),
        corpus: sample_corpus(),
    }
}
