use std::fmt;

use crate::{feature::Feature, session::Session};

/// An ordered, append-only set of features, from which a
/// [`Router`](crate::Router) can be created
///
/// Features are matched in the order they were added, so when two features
/// share a kind and discriminator the one added first always wins.
pub struct Registry<S: Session> {
    features: Vec<Feature<S>>,
}

impl<S: Session> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("features", &self.features)
            .finish()
    }
}

impl<S: Session> Default for Registry<S> {
    fn default() -> Self { Self::new() }
}

impl<S: Session> Registry<S> {
    /// Construct a new, empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    /// Append a feature
    #[inline]
    pub fn add_feature(&mut self, feature: Feature<S>) -> &mut Self {
        self.features.push(feature);
        self
    }

    /// Append several features, preserving their order
    #[inline]
    pub fn add_features(&mut self, features: impl IntoIterator<Item = Feature<S>>) -> &mut Self {
        self.features.extend(features);
        self
    }

    /// All registered features, in insertion order
    #[inline]
    #[must_use]
    pub fn features(&self) -> &[Feature<S>] { &self.features }

    /// The number of registered features
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize { self.features.len() }

    /// Returns true if no features have been registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.features.is_empty() }

    #[inline]
    pub(crate) fn into_features(self) -> Box<[Feature<S>]> { self.features.into_boxed_slice() }
}

impl<S: Session> Extend<Feature<S>> for Registry<S> {
    #[inline]
    fn extend<I: IntoIterator<Item = Feature<S>>>(&mut self, iter: I) {
        self.add_features(iter);
    }
}

impl<S: Session> FromIterator<Feature<S>> for Registry<S> {
    fn from_iter<I: IntoIterator<Item = Feature<S>>>(iter: I) -> Self {
        let mut reg = Self::new();
        reg.add_features(iter);
        reg
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::Registry;
    use crate::{
        feature::Feature,
        mock::{Cmd, Mock, Recorder},
    };

    fn labels(reg: &Registry<Mock>) -> Vec<String> {
        reg.features()
            .iter()
            .map(|f| f.route().discriminator().to_owned())
            .collect()
    }

    #[test]
    fn test_empty() {
        let reg = Registry::<Mock>::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn test_mixed_order() {
        let (rec, _) = Recorder::new("x");
        let mut reg = Registry::<Mock>::new();
        reg.add_feature(Feature::command(Cmd("a"), rec.clone()))
            .add_features([
                Feature::component("b", rec.clone()),
                Feature::modal("c", rec.clone()),
            ])
            .add_feature(Feature::autocomplete(Cmd("d"), rec));

        assert_eq!(reg.len(), 4);
        assert_eq!(labels(&reg), ["a", "b", "c", "d"]);
    }

    proptest! {
        #[test]
        fn test_concatenation_order(
            batches in prop::collection::vec(
                (any::<bool>(), prop::collection::vec("[a-z]{1,6}", 0..5)),
                0..8,
            ),
        ) {
            let (rec, _) = Recorder::new("x");
            let mut reg = Registry::<Mock>::new();
            let mut expected = vec![];

            for (single, ids) in batches {
                expected.extend(ids.iter().cloned());
                let feats = ids
                    .into_iter()
                    .map(|i| Feature::<Mock>::component(i, rec.clone()));

                if single {
                    for feat in feats {
                        reg.add_feature(feat);
                    }
                } else {
                    reg.add_features(feats);
                }
            }

            prop_assert_eq!(labels(&reg), expected);
        }
    }
}
