#[cfg(test)]
mod tests {
    use crate::field::Field;
    use crate::record::{ColumnMeta, Record, RecordError};
    use crate::value::SqlValue;
    use crate::{Criteria, criteria};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default, PartialEq)]
    struct Tag {
        slug: Field<String>,
        label: Field<String>,
        uses: Field<i64>,
    }

    crate::record! {
        impl Tag {
            table: "tags",
            primary_key: slug,
            columns: {
                slug,
                label: "display_name",
                uses,
            }
        }
    }

    #[test]
    fn criteria_macro_mixes_value_types() {
        let c = criteria! { "x" => 3, "y" => "cool", "z" => () };
        let values: Vec<&SqlValue> = c.iter().map(|(_, v)| v).collect();
        assert_eq!(
            values,
            vec![&SqlValue::I64(3), &SqlValue::from("cool"), &SqlValue::Null]
        );
        assert_eq!(criteria! {}, Criteria::new());
    }

    #[test]
    fn record_macro_builds_descriptor() {
        let desc = Tag::descriptor();
        assert_eq!(desc.record, "Tag");
        assert_eq!(desc.table, "tags");
        assert_eq!(desc.primary_key, "slug");
        assert_eq!(
            desc.columns,
            &[
                ColumnMeta {
                    field: "slug",
                    column: "",
                },
                ColumnMeta {
                    field: "label",
                    column: "display_name",
                },
                ColumnMeta {
                    field: "uses",
                    column: "",
                },
            ]
        );
    }

    #[test]
    fn record_macro_field_values_skip_unset() {
        let tag = Tag {
            slug: "rust".to_string().into(),
            label: Field::Null,
            uses: Field::Unset,
        };
        assert_eq!(
            tag.field_values(),
            vec![("slug", SqlValue::from("rust")), ("label", SqlValue::Null)]
        );
    }

    #[test]
    fn record_macro_assign() {
        let mut tag = Tag::default();
        assert_eq!(tag.assign("uses", SqlValue::I64(9)), Ok(true));
        assert_eq!(tag.assign("display_name", "Rust".into()), Ok(false));
        assert_eq!(tag.uses, Field::Value(9));

        let err = tag.assign("label", SqlValue::I64(1)).unwrap_err();
        assert!(matches!(err, RecordError::Decode { ref field, .. } if field == "label"));
        assert_eq!(
            err.to_string(),
            "cannot decode field `label`: expected text, found integer"
        );
    }
}
