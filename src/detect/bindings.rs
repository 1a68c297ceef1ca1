//! The fixed binding table mapping (measure, category) to scoring rules.

use crate::inspectors::Category;

use super::rules::Rule;

const RATIO_RULES: &[Rule] = &[Rule::PositiveRatio, Rule::ZeroRatio];
const DEVIATION_RULES: &[Rule] = &[Rule::AbsPercentError { threshold: 1.0 }];

struct Binding {
    measure: &'static str,
    /// `None` binds the measure for every category.
    category: Option<Category>,
    rules: &'static [Rule],
}

static BINDINGS: &[Binding] = &[
    Binding {
        measure: "null_ratio",
        category: None,
        rules: RATIO_RULES,
    },
    Binding {
        measure: "row_count",
        category: None,
        rules: DEVIATION_RULES,
    },
    Binding {
        measure: "distinct_count",
        category: None,
        rules: &[Rule::SingleValue],
    },
    Binding {
        measure: "empty_ratio",
        category: Some(Category::String),
        rules: RATIO_RULES,
    },
    Binding {
        measure: "redundancy_indicator",
        category: Some(Category::String),
        rules: RATIO_RULES,
    },
    Binding {
        measure: "special_character_ratio",
        category: Some(Category::String),
        rules: RATIO_RULES,
    },
    Binding {
        measure: "trim_required_ratio",
        category: Some(Category::String),
        rules: RATIO_RULES,
    },
    Binding {
        measure: "max_value",
        category: Some(Category::Number),
        rules: DEVIATION_RULES,
    },
    Binding {
        measure: "min_value",
        category: Some(Category::Number),
        rules: DEVIATION_RULES,
    },
    Binding {
        measure: "mean_value",
        category: Some(Category::Number),
        rules: DEVIATION_RULES,
    },
    Binding {
        measure: "median_value",
        category: Some(Category::Number),
        rules: DEVIATION_RULES,
    },
    Binding {
        measure: "stdev",
        category: Some(Category::Number),
        rules: DEVIATION_RULES,
    },
    Binding {
        measure: "value_skew",
        category: Some(Category::Number),
        rules: DEVIATION_RULES,
    },
    Binding {
        measure: "negative_ratio",
        category: Some(Category::Number),
        rules: RATIO_RULES,
    },
    Binding {
        measure: "zero_ratio",
        category: Some(Category::Number),
        rules: RATIO_RULES,
    },
    Binding {
        measure: "max_value",
        category: Some(Category::Datetime),
        rules: &[Rule::Consistency { greater_than: true }],
    },
    Binding {
        measure: "min_value",
        category: Some(Category::Datetime),
        rules: &[Rule::Consistency {
            greater_than: false,
        }],
    },
    Binding {
        measure: "true_ratio",
        category: Some(Category::Boolean),
        rules: RATIO_RULES,
    },
    Binding {
        measure: "false_ratio",
        category: Some(Category::Boolean),
        rules: RATIO_RULES,
    },
];

/// Rules bound to `measure` under `category`; empty for unbound measures.
pub(crate) fn rules_for(measure: &str, category: Category) -> impl Iterator<Item = Rule> + '_ {
    BINDINGS
        .iter()
        .filter(move |binding| {
            binding.measure == measure
                && binding.category.map_or(true, |bound| bound == category)
        })
        .flat_map(|binding| binding.rules.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_ratio_binds_for_every_category() {
        for category in [
            Category::Boolean,
            Category::String,
            Category::Number,
            Category::Datetime,
            Category::Generic,
        ] {
            let rules: Vec<Rule> = rules_for("null_ratio", category).collect();
            assert_eq!(rules, vec![Rule::PositiveRatio, Rule::ZeroRatio]);
        }
    }

    #[test]
    fn extremes_bind_per_category() {
        let numeric: Vec<Rule> = rules_for("max_value", Category::Number).collect();
        assert_eq!(numeric, vec![Rule::AbsPercentError { threshold: 1.0 }]);

        let datetime: Vec<Rule> = rules_for("max_value", Category::Datetime).collect();
        assert_eq!(datetime, vec![Rule::Consistency { greater_than: true }]);

        let min_datetime: Vec<Rule> = rules_for("min_value", Category::Datetime).collect();
        assert_eq!(
            min_datetime,
            vec![Rule::Consistency {
                greater_than: false
            }]
        );
    }

    #[test]
    fn string_measures_do_not_bind_elsewhere() {
        assert_eq!(rules_for("empty_ratio", Category::Number).count(), 0);
        assert_eq!(rules_for("empty_ratio", Category::String).count(), 2);
    }

    #[test]
    fn unbound_measures_have_no_rules() {
        assert_eq!(rules_for("top_five_value_counts", Category::Number).count(), 0);
        assert_eq!(rules_for("precision_variance", Category::Datetime).count(), 0);
    }
}
