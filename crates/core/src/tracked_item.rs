//! The fixed set of tracked deities/mantras and their field descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::CounterField;

/// One of the independently counted mantra slots in a record.
///
/// Declaration order is the default display order and the export row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackedItem {
    Amitabha,
    GuruRinpoche,
    GreenTara,
    WhiteTara,
    Chenrezig,
    Dzambhala,
    Shakyamuni,
    MedicineBuddha,
    Manjushri,
    Vajrasattva,
    Confessions,
}

/// Static description of a tracked item: wire key, labels and field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    pub item: TrackedItem,
    pub key: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub completed_field: &'static str,
    pub recitations_field: &'static str,
    pub image_field: &'static str,
}

const fn descriptor(
    item: TrackedItem,
    key: &'static str,
    name: &'static str,
    title: &'static str,
    fields: [&'static str; 3],
) -> ItemDescriptor {
    ItemDescriptor {
        item,
        key,
        name,
        title,
        completed_field: fields[0],
        recitations_field: fields[1],
        image_field: fields[2],
    }
}

// Indexed by `TrackedItem as usize`.
static DESCRIPTORS: [ItemDescriptor; 11] = [
    descriptor(
        TrackedItem::Amitabha,
        "amitabha",
        "Amitabha",
        "Amitabha Mantra",
        ["completedMalas", "totalRecitations", "amitabhaImageUrl"],
    ),
    descriptor(
        TrackedItem::GuruRinpoche,
        "guru-rinpoche",
        "Guru Rinpoche",
        "Guru Rinpoche Mantra",
        [
            "guruRinpocheCompletedMalas",
            "guruRinpocheTotalRecitations",
            "guruRinpocheImageUrl",
        ],
    ),
    descriptor(
        TrackedItem::GreenTara,
        "green-tara",
        "Green Tara",
        "Green Tara Mantra",
        ["greenTaraCompletedMalas", "greenTaraTotalRecitations", "greenTaraImageUrl"],
    ),
    descriptor(
        TrackedItem::WhiteTara,
        "white-tara",
        "White Tara",
        "White Tara Mantra",
        ["whiteTaraCompletedMalas", "whiteTaraTotalRecitations", "whiteTaraImageUrl"],
    ),
    descriptor(
        TrackedItem::Chenrezig,
        "chenrezig",
        "Chenrezig",
        "Chenrezig Mantra",
        ["chenrezigCompletedMalas", "chenrezigTotalRecitations", "chenrezigImageUrl"],
    ),
    descriptor(
        TrackedItem::Dzambhala,
        "dzambhala",
        "Dzambhala",
        "Dzambhala Mantra",
        ["dzambhalaCompletedMalas", "dzambhalaTotalRecitations", "dzambhalaImageUrl"],
    ),
    descriptor(
        TrackedItem::Shakyamuni,
        "shakyamuni",
        "Shakyamuni",
        "Shakyamuni Mantra",
        ["shakyamuniCompletedMalas", "shakyamuniTotalRecitations", "shakyamuniImageUrl"],
    ),
    descriptor(
        TrackedItem::MedicineBuddha,
        "medicine-buddha",
        "Medicine Buddha",
        "Medicine Buddha Mantra",
        [
            "medicineBuddhaCompletedMalas",
            "medicineBuddhaTotalRecitations",
            "medicineBuddhaImageUrl",
        ],
    ),
    descriptor(
        TrackedItem::Manjushri,
        "manjushri",
        "Manjushri",
        "Manjushri Mantra",
        ["manjushriCompletedMalas", "manjushriTotalRecitations", "manjushriImageUrl"],
    ),
    descriptor(
        TrackedItem::Vajrasattva,
        "vajrasattva",
        "Vajrasattva",
        "Vajrasattva Mantra",
        ["vajrasattvaCompletedMalas", "vajrasattvaTotalRecitations", "vajrasattvaImageUrl"],
    ),
    descriptor(
        TrackedItem::Confessions,
        "confessions",
        "35 Confessions",
        "35 Confessions Mantra",
        ["confessionsCompletedMalas", "confessionsTotalRecitations", "confessionsImageUrl"],
    ),
];

impl TrackedItem {
    /// All items in default display order.
    pub const ALL: [TrackedItem; 11] = [
        Self::Amitabha,
        Self::GuruRinpoche,
        Self::GreenTara,
        Self::WhiteTara,
        Self::Chenrezig,
        Self::Dzambhala,
        Self::Shakyamuni,
        Self::MedicineBuddha,
        Self::Manjushri,
        Self::Vajrasattva,
        Self::Confessions,
    ];

    /// The item whose live counter is `currentCount`.
    pub const PRIMARY: TrackedItem = Self::Amitabha;

    #[must_use]
    pub fn descriptor(self) -> &'static ItemDescriptor {
        &DESCRIPTORS[self.index()]
    }

    /// Position in [`TrackedItem::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Amitabha)
    }

    #[must_use]
    pub const fn completed_field(self) -> CounterField {
        CounterField::CompletedMalas(self)
    }

    #[must_use]
    pub const fn recitations_field(self) -> CounterField {
        CounterField::TotalRecitations(self)
    }

    #[must_use]
    pub const fn image_field(self) -> CounterField {
        CounterField::ImageUrl(self)
    }
}

impl fmt::Display for TrackedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TrackedItem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|item| item.key() == s)
            .ok_or_else(|| CoreError::UnrecognizedItem(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_enum_order() {
        for (i, item) in TrackedItem::ALL.into_iter().enumerate() {
            assert_eq!(item.index(), i);
            assert_eq!(item.descriptor().item, item);
        }
    }

    #[test]
    fn test_parse_kebab_keys() {
        assert_eq!("green-tara".parse::<TrackedItem>(), Ok(TrackedItem::GreenTara));
        assert_eq!("medicine-buddha".parse::<TrackedItem>(), Ok(TrackedItem::MedicineBuddha));
        assert_eq!(
            "greenTara".parse::<TrackedItem>(),
            Err(CoreError::UnrecognizedItem("greenTara".to_owned()))
        );
        assert!("".parse::<TrackedItem>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_keys() {
        let json = serde_json::to_string(&TrackedItem::GuruRinpoche).unwrap();
        assert_eq!(json, "\"guru-rinpoche\"");
        let back: TrackedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TrackedItem::GuruRinpoche);
    }

    #[test]
    fn test_only_amitabha_is_primary() {
        let primaries: Vec<_> = TrackedItem::ALL.into_iter().filter(|i| i.is_primary()).collect();
        assert_eq!(primaries, vec![TrackedItem::PRIMARY]);
        assert_eq!(TrackedItem::PRIMARY.descriptor().completed_field, "completedMalas");
    }

    #[test]
    fn test_field_names_are_unique() {
        let mut names: Vec<&str> = TrackedItem::ALL
            .iter()
            .flat_map(|i| {
                let d = i.descriptor();
                [d.completed_field, d.recitations_field, d.image_field]
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 33);
    }
}
