//! 宏集合：`criteria!` 以键值对形式构造条件组，`record!` 为记录类型生成 [`Record`](crate::record::Record) 实现。
//! 另有 [`IntoStrings`]，让 `group_by` / `returning` 同时接受单个字符串和字符串集合。

/// 以 `字段 => 值` 的形式构造 [`Criteria`](crate::Criteria)，值可以是不同类型。
///
/// ```ignore
/// q.where_(criteria! { "x" => 3, "y" => "cool", "z" => () }.compare("!=").joined_by("or"))?;
/// ```
#[macro_export]
macro_rules! criteria {
    () => {
        $crate::Criteria::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut criteria = $crate::Criteria::new();
        $(
            criteria.push($field, $value);
        )+
        criteria
    }};
}

/// 为记录类型实现 [`Record`](crate::record::Record)。
///
/// 字段类型须为 [`Field<T>`](crate::Field)。列名可省略，省略时由默认 field mapper 推导。
///
/// ```ignore
/// record! {
///     impl Vehicle {
///         table: "vehicles",
///         primary_key: id,
///         columns: {
///             id,
///             make,
///             brief_description: "blurb",
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        impl $ty:ty {
            table: $table:literal,
            primary_key: $pk:ident,
            columns: {
                $( $field:ident $(: $column:literal)? ),* $(,)?
            } $(,)?
        }
    ) => {
        impl $crate::record::Record for $ty {
            fn descriptor() -> &'static $crate::record::RecordDescriptor {
                static DESCRIPTOR: $crate::record::RecordDescriptor =
                    $crate::record::RecordDescriptor {
                        record: stringify!($ty),
                        table: $table,
                        primary_key: stringify!($pk),
                        columns: &[
                            $(
                                $crate::record::ColumnMeta {
                                    field: stringify!($field),
                                    column: $crate::__record_column!($($column)?),
                                }
                            ),*
                        ],
                    };
                &DESCRIPTOR
            }

            fn field_values(&self) -> Vec<(&'static str, $crate::value::SqlValue)> {
                let mut values = Vec::new();
                $(
                    if let Some(v) = self.$field.to_sql_value() {
                        values.push((stringify!($field), v));
                    }
                )*
                values
            }

            fn assign(
                &mut self,
                field: &str,
                value: $crate::value::SqlValue,
            ) -> $crate::record::RecordResult<bool> {
                match field {
                    $(
                        stringify!($field) => {
                            self.$field.assign(value).map_err(|source| {
                                $crate::record::RecordError::Decode {
                                    field: field.to_string(),
                                    source,
                                }
                            })?;
                            Ok(true)
                        }
                    )*
                    _ => Ok(false),
                }
            }
        }
    };
}

/// 宏内部 helper：未声明列名时为空串。
#[doc(hidden)]
#[macro_export]
macro_rules! __record_column {
    () => {
        ""
    };
    ($column:literal) => {
        $column
    };
}

pub trait IntoStrings {
    fn extend_into_strings(self, dst: &mut Vec<String>);
}

impl IntoStrings for String {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self);
    }
}

impl IntoStrings for &str {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self.to_string());
    }
}

impl<const N: usize, T> IntoStrings for [T; N]
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

impl<T> IntoStrings for &[T]
where
    T: Into<String> + Clone,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.iter().cloned().map(Into::into));
    }
}

impl<T> IntoStrings for Vec<T>
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

#[doc(hidden)]
pub fn collect_into_strings<T>(value: T) -> Vec<String>
where
    T: IntoStrings,
{
    let mut dst = Vec::new();
    value.extend_into_strings(&mut dst);
    dst
}
