//! Non-interactive `pfind list` support.
//!
//! [`build_filter`] turns the `--property/--operator/--value` flags into a
//! [`Filter`] against the loaded [`Datastore`]; [`list`] evaluates it and
//! renders the surviving rows.

use anyhow::{bail, Context};
use pfind_core::{
    builder::parse_value_input, catalog::valid_operators, filter_products, table::render_plain,
    Datastore, Filter, Operator, OperatorKind,
};

/// Output format of `pfind list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Table,
    Json,
}

/// Filter flags exactly as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    pub property: Option<String>,
    pub operator: Option<String>,
    pub value: Option<String>,
}

/// Resolve filter flags against `store`.
///
/// No `--property` means no filter. The property is matched by name,
/// case-insensitively. The operator is an operator id (`equals`, `any`,
/// `in`, ...); value-bearing operators require `--value`.
pub fn build_filter(store: &Datastore, args: &FilterArgs) -> anyhow::Result<Option<Filter>> {
    let Some(name) = args.property.as_deref() else {
        if args.operator.is_some() || args.value.is_some() {
            bail!("--operator and --value need --property");
        }
        return Ok(None);
    };

    let property = store
        .properties()
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .cloned()
        .with_context(|| {
            let known: Vec<&str> = store.properties().iter().map(|p| p.name.as_str()).collect();
            format!("unknown property {name:?} (known: {})", known.join(", "))
        })?;

    let op_id = args.operator.as_deref().unwrap_or("equals");
    let kind = OperatorKind::from_id(op_id);
    if kind == OperatorKind::Unknown {
        let ids: Vec<&str> = OperatorKind::ALL.iter().map(|k| k.id()).collect();
        bail!("unknown operator {op_id:?} (expected one of: {})", ids.join(", "));
    }

    let legal = valid_operators(store.operators(), Some(&property));
    let operator = match legal.iter().find(|op| op.id == kind) {
        Some(op) => op.clone(),
        None => {
            tracing::warn!(
                property = %property.name,
                operator = kind.id(),
                "operator is not offered for this property type"
            );
            Operator::from(kind)
        }
    };

    let value = match (kind.takes_value(), args.value.as_deref()) {
        (true, Some(raw)) => Some(parse_value_input(&property, raw)),
        (true, None) => bail!("operator {:?} needs --value", kind.id()),
        (false, Some(_)) => {
            tracing::warn!(operator = kind.id(), "ignoring --value for a presence operator");
            None
        }
        (false, None) => None,
    };

    tracing::debug!(property = %property.name, operator = kind.id(), "cli filter built");
    Ok(Some(Filter::new(property, operator, value)))
}

/// Normalize `store`, apply the filter flags, and render the result.
pub fn list(store: &Datastore, args: &FilterArgs, format: Format) -> anyhow::Result<String> {
    let products = store.normalized().context("failed to normalize datastore")?;
    let filter = build_filter(store, args)?;
    let rows = filter_products(&products, filter.as_ref())?;
    tracing::info!(shown = rows.len(), total = products.len(), "list");

    Ok(match format {
        Format::Table => render_plain(&rows),
        Format::Json => serde_json::to_string_pretty(&rows)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(property: &str, operator: &str, value: Option<&str>) -> FilterArgs {
        FilterArgs {
            property: Some(property.into()),
            operator: Some(operator.into()),
            value: value.map(Into::into),
        }
    }

    #[test]
    fn no_property_means_no_filter() {
        let store = Datastore::sample();
        assert!(build_filter(&store, &FilterArgs::default()).unwrap().is_none());
    }

    #[test]
    fn value_without_property_is_rejected() {
        let store = Datastore::sample();
        let args = FilterArgs {
            value: Some("x".into()),
            ..FilterArgs::default()
        };
        assert!(build_filter(&store, &args).is_err());
    }

    #[test]
    fn property_name_is_case_insensitive() {
        let store = Datastore::sample();
        let filter = build_filter(&store, &args("COLOR", "any", None)).unwrap().unwrap();
        assert_eq!(filter.property.name, "color");
        assert_eq!(filter.value, None);
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let store = Datastore::sample();
        let err = build_filter(&store, &args("color", "between", None)).unwrap_err();
        assert!(err.to_string().contains("between"));
    }

    #[test]
    fn value_operator_requires_value() {
        let store = Datastore::sample();
        assert!(build_filter(&store, &args("color", "contains", None)).is_err());
    }

    #[test]
    fn list_renders_filtered_table() {
        let store = Datastore::sample();
        let out = list(&store, &args("weight (oz)", "greater_than", Some("6")), Format::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Hammer"));
        assert!(lines[2].starts_with("Bluetooth Speaker"));
    }
}
