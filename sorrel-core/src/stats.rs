// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use crate::taxonomy::{ClassLabel, Taxonomy};

/// Per-(attribute, value) counters accumulated over one run
///
/// Counters are laid out parallel to the taxonomy: one row per attribute,
/// one slot per value, all zero-initialized. A counter advances exactly once
/// per recognized label, whether or not the record produces an output image.
///
/// # Examples
///
/// ```
/// use sorrel_core::stats::LabelStats;
/// use sorrel_core::taxonomy::Taxonomy;
///
/// let taxonomy = Taxonomy::from_json(r#"{"color": ["unknown", "red"]}"#).unwrap();
/// let mut stats = LabelStats::new(&taxonomy);
///
/// let label = taxonomy.resolve("color", "red").unwrap();
/// stats.record(label);
///
/// assert_eq!(stats.count(0, 1), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LabelStats {
    counts: Vec<Vec<u64>>,
}

impl LabelStats {
    /// Zero-initialize one counter per flattened (attribute, value) pair
    pub fn new(taxonomy: &Taxonomy) -> LabelStats {
        LabelStats {
            counts: taxonomy
                .attributes()
                .iter()
                .map(|attribute| vec![0; attribute.values.len()])
                .collect(),
        }
    }

    /// Increment the counter behind a resolved class label by one
    pub fn record(&mut self, label: &ClassLabel) {
        self.counts[label.attribute_index][label.value_index] += 1;
    }

    /// The current count for an (attribute, value) index pair
    pub fn count(&self, attribute_index: usize, value_index: usize) -> u64 {
        self.counts[attribute_index][value_index]
    }

    /// Render the per-attribute count table printed at the end of a run
    ///
    /// For each attribute, in taxonomy order: the attribute name, a line of
    /// its value names, and a line of right-aligned counts underneath.
    pub fn report(&self, taxonomy: &Taxonomy) -> String {
        let mut out = String::new();

        for (attribute_index, attribute) in taxonomy.attributes().iter().enumerate() {
            let counts = &self.counts[attribute_index];

            let widths: Vec<usize> = attribute
                .values
                .iter()
                .zip(counts)
                .map(|(value, count)| value.chars().count().max(count.to_string().len()))
                .collect();

            let names: Vec<String> = attribute
                .values
                .iter()
                .zip(&widths)
                .map(|(value, &width)| format!("{:>width$}", value))
                .collect();

            let counts: Vec<String> = counts
                .iter()
                .zip(&widths)
                .map(|(count, &width)| format!("{:>width$}", count))
                .collect();

            out.push_str(&attribute.name);
            out.push_str(":\n");
            out.push_str(&names.join("  "));
            out.push('\n');
            out.push_str(&counts.join("  "));
            out.push('\n');
        }

        out
    }
}
