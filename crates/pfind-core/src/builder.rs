//! Filter builder: the cascading property → operator → value selection.
//!
//! [`FilterBuilder`] holds the three selections and derives the active
//! [`Filter`] from them. Front ends call the `select_*` / `set_value` methods
//! as the user picks entries and read [`FilterBuilder::active`] to decide what
//! to evaluate.
//!
//! # Transitions
//!
//! | Call | Effect |
//! |------|--------|
//! | `select_property` | sets property; clears operator and value; no active filter |
//! | `select_operator(any/none)` | active filter with no value, immediately |
//! | `select_operator(other)` | clears value; no active filter until a value arrives |
//! | `set_value` | active filter once property and operator are both set |
//! | `clear` | back to the empty state |

use crate::catalog::valid_operators;
use crate::normalizer::parse_number;
use crate::types::{Filter, FilterValue, Operator, Property, PropertyType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBuilder {
    property: Option<Property>,
    operator: Option<Operator>,
    value: Option<FilterValue>,
    active: Option<Filter>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self) -> Option<&Property> {
        self.property.as_ref()
    }

    pub fn operator(&self) -> Option<&Operator> {
        self.operator.as_ref()
    }

    pub fn value(&self) -> Option<&FilterValue> {
        self.value.as_ref()
    }

    /// The filter clause to evaluate, if the selection is complete.
    pub fn active(&self) -> Option<&Filter> {
        self.active.as_ref()
    }

    pub fn select_property(&mut self, property: Property) {
        tracing::debug!(property = %property.name, kind = %property.kind, "builder: property selected");
        self.property = Some(property);
        self.operator = None;
        self.value = None;
        self.active = None;
    }

    pub fn select_operator(&mut self, operator: Operator) {
        tracing::debug!(operator = operator.id.id(), "builder: operator selected");
        self.value = None;
        self.active = None;

        if !operator.id.takes_value() {
            if let Some(property) = &self.property {
                self.active = Some(Filter::new(property.clone(), operator.clone(), None));
            }
        }
        self.operator = Some(operator);
    }

    pub fn set_value(&mut self, value: FilterValue) {
        tracing::debug!(value = %value, "builder: value set");
        self.active = match (&self.property, &self.operator) {
            (Some(property), Some(operator)) => Some(Filter::new(
                property.clone(),
                operator.clone(),
                Some(value.clone()),
            )),
            _ => None,
        };
        self.value = Some(value);
    }

    pub fn clear(&mut self) {
        tracing::debug!("builder: cleared");
        *self = Self::default();
    }

    /// `true` when a property and a value-bearing operator are selected, i.e.
    /// the value selector should be shown.
    pub fn needs_value(&self) -> bool {
        self.property.is_some() && self.operator.as_ref().is_some_and(|op| op.id.takes_value())
    }

    /// Candidate values for the value selector: the property's allowed values
    /// when it is enumerated, otherwise empty (free-form input).
    pub fn possible_values(&self) -> &[String] {
        match &self.property {
            Some(Property {
                kind: PropertyType::Enumerated,
                values: Some(values),
                ..
            }) => values,
            _ => &[],
        }
    }

    /// Operators that fit the selected property.
    pub fn valid_operators(&self, operators: &[Operator]) -> Vec<Operator> {
        valid_operators(operators, self.property.as_ref())
    }
}

/// Interpret free-form value input for `property`. Number properties parse
/// leniently (unparseable input becomes `0`); everything else stays text.
pub fn parse_value_input(property: &Property, input: &str) -> FilterValue {
    match property.kind {
        PropertyType::Number => FilterValue::Number(parse_number(input).unwrap_or(0.0)),
        _ => FilterValue::Text(input.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperatorKind;
    use pretty_assertions::assert_eq;

    fn category() -> Property {
        Property::new(3, "category", PropertyType::Enumerated)
            .with_values(["tools", "electronics", "kitchenware"])
    }

    fn weight() -> Property {
        Property::new(2, "weight (oz)", PropertyType::Number)
    }

    #[test]
    fn starts_empty() {
        let b = FilterBuilder::new();
        assert!(b.active().is_none());
        assert!(!b.needs_value());
        assert!(b.possible_values().is_empty());
    }

    #[test]
    fn presence_operator_activates_immediately() {
        let mut b = FilterBuilder::new();
        b.select_property(category());
        b.select_operator(OperatorKind::NoValue.into());
        let active = b.active().unwrap();
        assert_eq!(active.operator.id, OperatorKind::NoValue);
        assert_eq!(active.value, None);
        assert!(!b.needs_value());
    }

    #[test]
    fn value_operator_waits_for_value() {
        let mut b = FilterBuilder::new();
        b.select_property(weight());
        b.select_operator(OperatorKind::GreaterThan.into());
        assert!(b.active().is_none());
        assert!(b.needs_value());

        b.set_value(FilterValue::Number(6.0));
        assert_eq!(b.active().unwrap().value, Some(FilterValue::Number(6.0)));
    }

    #[test]
    fn changing_property_resets_downstream() {
        let mut b = FilterBuilder::new();
        b.select_property(weight());
        b.select_operator(OperatorKind::Equals.into());
        b.set_value(FilterValue::Number(5.0));

        b.select_property(category());
        assert!(b.operator().is_none());
        assert!(b.value().is_none());
        assert!(b.active().is_none());
        assert_eq!(b.possible_values(), ["tools", "electronics", "kitchenware"]);
    }

    #[test]
    fn changing_operator_resets_value() {
        let mut b = FilterBuilder::new();
        b.select_property(weight());
        b.select_operator(OperatorKind::Equals.into());
        b.set_value(FilterValue::Number(5.0));
        b.select_operator(OperatorKind::LessThan.into());
        assert!(b.value().is_none());
        assert!(b.active().is_none());
    }

    #[test]
    fn value_without_operator_stays_inactive() {
        let mut b = FilterBuilder::new();
        b.select_property(weight());
        b.set_value(FilterValue::Number(1.0));
        assert!(b.active().is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut b = FilterBuilder::new();
        b.select_property(category());
        b.select_operator(OperatorKind::HasValue.into());
        b.clear();
        assert_eq!(b, FilterBuilder::new());
    }

    #[test]
    fn number_input_parses_leniently() {
        assert_eq!(parse_value_input(&weight(), "6.5"), FilterValue::Number(6.5));
        assert_eq!(parse_value_input(&weight(), "abc"), FilterValue::Number(0.0));
        assert_eq!(
            parse_value_input(&category(), "tools"),
            FilterValue::Text("tools".into())
        );
    }
}
