#[cfg(test)]
mod tests {
    use crate::criteria::{Criteria, DEFAULT_COMPARATOR, DEFAULT_JOINER};
    use crate::query::Query;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let c = Criteria::new();
        assert!(c.is_empty());
        assert_eq!(c.comparator(), DEFAULT_COMPARATOR);
        assert_eq!(c.joiner(), DEFAULT_JOINER);
    }

    #[test]
    fn keeps_insertion_order() {
        let c = Criteria::new()
            .and("b", 2)
            .and("a", 1)
            .and("c", "three")
            .compare("<>")
            .joined_by("or");
        let fields: Vec<&str> = c.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["b", "a", "c"]);
        assert_eq!(c.len(), 3);
        assert_eq!(c.comparator(), "<>");
        assert_eq!(c.joiner(), "or");
    }

    #[test]
    fn from_pairs() {
        let c = Criteria::from([("x", 3), ("y", 4)]);
        let mut q = Query::new();
        q.append_criteria(&c).unwrap();
        assert_eq!(q.sql(), "x = ? and y = ?");

        let c: Criteria = vec![("name", "bob".to_string())].into();
        assert_eq!(
            c.iter().collect::<Vec<_>>(),
            vec![("name", &SqlValue::from("bob".to_string()))]
        );
    }

    #[test]
    fn where_accepts_homogeneous_arrays() {
        let mut q = Query::delete_from("things");
        q.where_([("x", 5), ("y", 6)]).unwrap();
        assert_eq!(q.sql(), "delete from things where ( x = ? and y = ? )");
    }

    #[test]
    fn n_pairs_give_n_placeholders() {
        let c: Criteria = (0..5_i64).map(|i| (format!("f{i}"), i)).collect();
        let mut q = Query::new();
        q.append_criteria(&c).unwrap();
        assert_eq!(q.sql().matches('?').count(), 5);
        assert_eq!(q.args().len(), 5);
        assert_eq!(q.args().value(5), Some(&SqlValue::I64(4)));
    }

    #[test]
    fn empty_group_renders_empty_parens() {
        let mut q = Query::new();
        q.where_(Criteria::new()).unwrap();
        assert_eq!(q.sql(), "where ( )");
    }
}
