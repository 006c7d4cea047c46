use serde::{Deserialize, Serialize};

use crate::data::column::ColumnSpec;
use crate::data::datatable::{DataColumn, DataRow, DataTable, DataValue};

/// A top-level component as served by the inventory endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub component_id: i64,
    pub component_name: String,
    pub parent_component_id: Option<i64>,
    /// A missing array is treated as empty: the component then contributes
    /// no rows instead of failing the whole payload.
    #[serde(default)]
    pub subcomponents: Vec<SubcomponentRecord>,
}

/// A subcomponent nested inside a component record. Everything past the
/// id/name pair is optional upstream and passes through as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcomponentRecord {
    pub component_id: i64,
    pub component_name: String,
    pub sku_code: Option<String>,
    pub hsn_code: Option<String>,
    pub total_quantity: Option<i64>,
    pub usable_quantity: Option<i64>,
    pub damaged_quantity: Option<i64>,
    pub discarded_quantity: Option<i64>,
    pub last_updated: Option<String>,
}

/// Column names of the flattened table, in display order
pub const FLAT_COLUMNS: &[&str] = &[
    "component_id",
    "component_name",
    "parent_component_id",
    "subcomponent_id",
    "subcomponent_name",
    "sku_code",
    "hsn_code",
    "total_quantity",
    "usable_quantity",
    "damaged_quantity",
    "discarded_quantity",
    "last_updated",
];

/// Flatten nested component records into one row per
/// (component, subcomponent) pair. The parent's identifying fields are
/// merged with the subcomponent's fields, the subcomponent id/name renamed
/// to `subcomponent_id`/`subcomponent_name`.
pub fn flatten_components(records: &[ComponentRecord]) -> DataTable {
    let mut table = DataTable::new("inventory");
    for name in FLAT_COLUMNS {
        table.add_column(DataColumn::new(*name));
    }

    for component in records {
        for sub in &component.subcomponents {
            let values = vec![
                DataValue::Integer(component.component_id),
                DataValue::String(component.component_name.clone()),
                DataValue::from_opt(component.parent_component_id, DataValue::Integer),
                DataValue::Integer(sub.component_id),
                DataValue::String(sub.component_name.clone()),
                DataValue::from_opt(sub.sku_code.clone(), DataValue::String),
                DataValue::from_opt(sub.hsn_code.clone(), DataValue::String),
                DataValue::from_opt(sub.total_quantity, DataValue::Integer),
                DataValue::from_opt(sub.usable_quantity, DataValue::Integer),
                DataValue::from_opt(sub.damaged_quantity, DataValue::Integer),
                DataValue::from_opt(sub.discarded_quantity, DataValue::Integer),
                DataValue::from_opt(sub.last_updated.clone(), DataValue::DateTime),
            ];
            // Arity is fixed by construction, so this cannot fail
            let _ = table.add_row(DataRow::new(values));
        }
    }

    table.infer_column_types();
    table
}

/// The default column set for the inventory table
pub fn inventory_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("component_name", "Parent Component"),
        ColumnSpec::new("subcomponent_name", "Sub Component"),
        ColumnSpec::new("sku_code", "SKU"),
        ColumnSpec::new("usable_quantity", "Usable Quantity"),
        ColumnSpec::new("discarded_quantity", "Discarded Quantity"),
        ColumnSpec::new("damaged_quantity", "Damaged"),
        ColumnSpec::new("total_quantity", "Total Quantity"),
        ColumnSpec::new("last_updated", "Last Updated").with_renderer(|value, _row| {
            // Show the date part only; timestamps arrive as ISO 8601
            let text = value.to_string();
            match text.split_once('T') {
                Some((date, _)) => date.to_string(),
                None => text,
            }
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(id: i64, name: &str) -> SubcomponentRecord {
        SubcomponentRecord {
            component_id: id,
            component_name: name.to_string(),
            sku_code: Some(format!("SKU-{id}")),
            hsn_code: Some(format!("HSN-{id}")),
            total_quantity: Some(10),
            usable_quantity: Some(8),
            damaged_quantity: Some(1),
            discarded_quantity: Some(1),
            last_updated: Some("2024-01-01".to_string()),
        }
    }

    #[test]
    fn test_row_per_subcomponent() {
        let records = vec![
            ComponentRecord {
                component_id: 1,
                component_name: "Frame".to_string(),
                parent_component_id: None,
                subcomponents: vec![sub(10, "Tube"), sub(11, "Weld")],
            },
            ComponentRecord {
                component_id: 2,
                component_name: "Empty".to_string(),
                parent_component_id: Some(1),
                subcomponents: vec![],
            },
            ComponentRecord {
                component_id: 3,
                component_name: "Wheel".to_string(),
                parent_component_id: None,
                subcomponents: vec![sub(12, "Spoke")],
            },
        ];

        let table = flatten_components(&records);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), FLAT_COLUMNS.len());

        assert_eq!(
            table.get_value_by_name(0, "component_name"),
            Some(&DataValue::String("Frame".to_string()))
        );
        assert_eq!(
            table.get_value_by_name(0, "subcomponent_id"),
            Some(&DataValue::Integer(10))
        );
        assert_eq!(
            table.get_value_by_name(1, "subcomponent_name"),
            Some(&DataValue::String("Weld".to_string()))
        );
        assert_eq!(
            table.get_value_by_name(2, "component_id"),
            Some(&DataValue::Integer(3))
        );
    }

    #[test]
    fn test_missing_optionals_become_null() {
        let records = vec![ComponentRecord {
            component_id: 1,
            component_name: "Frame".to_string(),
            parent_component_id: None,
            subcomponents: vec![SubcomponentRecord {
                component_id: 10,
                component_name: "Tube".to_string(),
                sku_code: None,
                hsn_code: None,
                total_quantity: None,
                usable_quantity: None,
                damaged_quantity: None,
                discarded_quantity: None,
                last_updated: None,
            }],
        }];

        let table = flatten_components(&records);
        assert_eq!(table.row_count(), 1);
        assert_eq!(
            table.get_value_by_name(0, "parent_component_id"),
            Some(&DataValue::Null)
        );
        assert_eq!(table.get_value_by_name(0, "sku_code"), Some(&DataValue::Null));
        assert_eq!(
            table.get_value_by_name(0, "total_quantity"),
            Some(&DataValue::Null)
        );
    }

    #[test]
    fn test_missing_subcomponents_array_parses_as_empty() {
        let json = r#"[{"component_id": 1, "component_name": "Frame", "parent_component_id": null}]"#;
        let records: Vec<ComponentRecord> = serde_json::from_str(json).unwrap();
        assert!(records[0].subcomponents.is_empty());

        let table = flatten_components(&records);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_last_updated_renderer_trims_time() {
        let columns = inventory_columns();
        let col = columns.iter().find(|c| c.key == "last_updated").unwrap();
        let row = DataRow::new(vec![]);

        let stamped = DataValue::DateTime("2024-01-01T10:30:00Z".to_string());
        assert_eq!(col.render(&stamped, &row), "2024-01-01");

        let date_only = DataValue::DateTime("2024-01-01".to_string());
        assert_eq!(col.render(&date_only, &row), "2024-01-01");
    }
}
