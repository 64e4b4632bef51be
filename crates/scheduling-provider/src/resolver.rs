//! Key resolution
//!
//! Maps each requested key to one attribute of the scheduling decision. The
//! set of recognized keys is a closed table; supporting a new key means adding
//! one entry to [`RECOGNIZED_KEYS`].

use crate::error::{Error, Result};
use scheduling_provider_protocol::{
    Item, REGION_NOT_SCHEDULED, SchedulingAttributes, TIME_NOT_SCHEDULED,
};
use tracing::info;

/// Pure extraction of one attribute.
pub type Extractor = fn(&SchedulingAttributes) -> &str;

fn region(attributes: &SchedulingAttributes) -> &str {
    &attributes.region
}

fn time(attributes: &SchedulingAttributes) -> &str {
    &attributes.time
}

/// Every key the provider can resolve, with the attribute it resolves to.
pub const RECOGNIZED_KEYS: &[(&str, Extractor)] =
    &[(REGION_NOT_SCHEDULED, region), (TIME_NOT_SCHEDULED, time)];

/// A key that has been recognized but not yet resolved.
#[derive(Clone, Copy)]
pub struct Resolution<'k> {
    key: &'k str,
    extract: Extractor,
}

impl std::fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution").field("key", &self.key).finish()
    }
}

impl<'k> Resolution<'k> {
    /// Look a key up in the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if the key is not recognized.
    pub fn recognize(key: &'k str) -> Result<Self> {
        RECOGNIZED_KEYS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, extract)| Self { key, extract })
            .ok_or_else(|| Error::UnknownKey(key.to_string()))
    }

    /// Produce the result item for this key.
    pub fn apply(&self, attributes: &SchedulingAttributes) -> Item {
        let value = (self.extract)(attributes);
        info!(key = %self.key, value = %value, "resolved key");
        Item::new(self.key, value)
    }
}

/// Recognize every key of a batch, stopping at the first unknown one.
///
/// # Errors
///
/// Returns [`Error::UnknownKey`] for the first unrecognized key in input order.
pub fn recognize_all(keys: &[String]) -> Result<Vec<Resolution<'_>>> {
    keys.iter().map(|key| Resolution::recognize(key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use rstest::rstest;

    fn attributes() -> SchedulingAttributes {
        SchedulingAttributes {
            time: "2025-06-01T02:00:00Z".to_string(),
            provider: "gcp".to_string(),
            region: "us-central1".to_string(),
        }
    }

    #[rstest]
    #[case(REGION_NOT_SCHEDULED, "us-central1")]
    #[case(TIME_NOT_SCHEDULED, "2025-06-01T02:00:00Z")]
    fn test_resolve_recognized_key(#[case] key: &str, #[case] expected: &str) {
        let item = Resolution::recognize(key).unwrap().apply(&attributes());
        assert_eq!(item, Item::new(key, expected));
    }

    #[rstest]
    #[case("bogus_key")]
    #[case("")]
    #[case("REGION_NOT_SCHEDULED")]
    #[case("provider_not_scheduled")]
    fn test_resolve_unknown_key(#[case] key: &str) {
        assert_matches!(
            Resolution::recognize(key),
            Err(Error::UnknownKey(k)) if k == key
        );
    }

    #[test]
    fn test_empty_value_is_resolved() {
        let unscheduled = SchedulingAttributes::default();
        let item = Resolution::recognize(REGION_NOT_SCHEDULED)
            .unwrap()
            .apply(&unscheduled);
        assert_eq!(item.value.as_deref(), Some(""));
        assert!(item.error.is_none());
    }

    #[test]
    fn test_recognize_all_reports_first_unknown() {
        let keys: Vec<String> = ["time_not_scheduled", "first_bad", "second_bad"]
            .map(String::from)
            .to_vec();
        assert_matches!(recognize_all(&keys), Err(Error::UnknownKey(k)) if k == "first_bad");
    }

    #[test]
    fn test_recognize_all_empty() {
        assert!(recognize_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_table_has_no_duplicates() {
        for (i, (name, _)) in RECOGNIZED_KEYS.iter().enumerate() {
            assert!(
                RECOGNIZED_KEYS[i + 1..].iter().all(|(other, _)| other != name),
                "duplicate key {name}"
            );
        }
    }

    fn arb_known_key() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            REGION_NOT_SCHEDULED.to_string(),
            TIME_NOT_SCHEDULED.to_string(),
        ])
    }

    proptest! {
        /// Property: resolving a batch of known keys preserves length and order
        #[test]
        fn prop_known_keys_preserve_order(keys in prop::collection::vec(arb_known_key(), 0..100)) {
            let attributes = attributes();
            let items: Vec<Item> = recognize_all(&keys)
                .unwrap()
                .iter()
                .map(|resolution| resolution.apply(&attributes))
                .collect();

            prop_assert_eq!(items.len(), keys.len());
            for (item, key) in items.iter().zip(&keys) {
                prop_assert_eq!(&item.key, key);
                let expected = if key == REGION_NOT_SCHEDULED { "us-central1" } else { "2025-06-01T02:00:00Z" };
                prop_assert_eq!(item.value.as_deref(), Some(expected));
            }
        }

        /// Property: an unknown key anywhere fails the whole batch with that key
        #[test]
        fn prop_unknown_key_fails_batch(
            mut keys in prop::collection::vec(arb_known_key(), 0..20),
            position in any::<prop::sample::Index>(),
            unknown in "[a-z_]{1,20}_unknown",
        ) {
            let at = position.index(keys.len() + 1);
            keys.insert(at, unknown.clone());

            match recognize_all(&keys) {
                Err(Error::UnknownKey(k)) => prop_assert_eq!(k, unknown),
                other => prop_assert!(false, "expected UnknownKey, got {:?}", other),
            }
        }
    }
}
