//! Field mapper：记录字段没有声明列名时，用全局默认 mapper 由字段名推导列名。

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// 字段名映射函数类型。
pub type FieldMapperFunc = Arc<dyn Fn(&str) -> String + Send + Sync + 'static>;

static IDENTITY_MAPPER: OnceLock<FieldMapperFunc> = OnceLock::new();

/// 恒等 mapper：列名与字段名相同（默认）。
pub fn identity_mapper() -> FieldMapperFunc {
    IDENTITY_MAPPER
        .get_or_init(|| Arc::new(|s: &str| s.to_string()))
        .clone()
}

static DEFAULT_FIELD_MAPPER: OnceLock<Mutex<FieldMapperFunc>> = OnceLock::new();
static DEFAULT_FIELD_MAPPER_LOCK: Mutex<()> = Mutex::new(());

fn mapper_cell() -> &'static Mutex<FieldMapperFunc> {
    DEFAULT_FIELD_MAPPER.get_or_init(|| Mutex::new(identity_mapper()))
}

/// 获取当前全局默认 FieldMapper。
pub fn default_field_mapper() -> FieldMapperFunc {
    mapper_cell()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// 设置全局默认 FieldMapper，返回旧值。
pub fn set_default_field_mapper(mapper: FieldMapperFunc) -> FieldMapperFunc {
    let mut g = mapper_cell().lock().unwrap_or_else(|e| e.into_inner());
    std::mem::replace(&mut *g, mapper)
}

/// 修改全局默认 FieldMapper 的 RAII guard（持有全局锁，并行测试不会互相干扰）。
pub struct DefaultFieldMapperGuard {
    _lock: MutexGuard<'static, ()>,
    old: FieldMapperFunc,
}

impl Drop for DefaultFieldMapperGuard {
    fn drop(&mut self) {
        let _ = set_default_field_mapper(self.old.clone());
    }
}

/// 在一个作用域内临时设置默认 FieldMapper，退出作用域后自动恢复。
pub fn set_default_field_mapper_scoped(mapper: FieldMapperFunc) -> DefaultFieldMapperGuard {
    let lock = DEFAULT_FIELD_MAPPER_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_field_mapper(mapper);
    DefaultFieldMapperGuard { _lock: lock, old }
}

/// 列名解析：声明了列名就用声明的，否则交给默认 mapper。
pub(crate) fn resolve_column(field: &str, declared: &str) -> String {
    if declared.is_empty() {
        default_field_mapper()(field)
    } else {
        declared.to_string()
    }
}

/// SnakeCaseMapper：`briefDescription` / `BriefDescription` 转为 `brief_description`。
///
/// 单词边界：`aB`、`1B`，以及连续大写后接小写（`HTTPCode` -> `http_code`）。
pub fn snake_case_mapper(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_uppercase() {
            out.push(c);
            continue;
        }
        if i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    out
}

/// UpperCaseMapper：将字段名转为全部大写。
pub fn upper_case_mapper(s: &str) -> String {
    s.to_ascii_uppercase()
}

/// PrefixMapper：返回一个在字段名前添加固定前缀的 mapper。
pub fn prefix_mapper(prefix: &'static str) -> FieldMapperFunc {
    Arc::new(move |name| format!("{prefix}{name}"))
}

/// SuffixMapper：返回一个在字段名后添加固定后缀的 mapper。
pub fn suffix_mapper(suffix: &'static str) -> FieldMapperFunc {
    Arc::new(move |name| format!("{name}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn snake_case_boundaries() {
        assert_eq!(snake_case_mapper("briefDescription"), "brief_description");
        assert_eq!(snake_case_mapper("ModelYear"), "model_year");
        assert_eq!(snake_case_mapper("HTTPCode"), "http_code");
        assert_eq!(snake_case_mapper("already_snake"), "already_snake");
    }

    #[test]
    fn upper_case_mapper_changes_case() {
        assert_eq!(upper_case_mapper("make"), "MAKE");
    }

    #[test]
    fn prefix_suffix_mappers_apply() {
        let prefix = prefix_mapper("v_");
        let suffix = suffix_mapper("_col");
        assert_eq!(prefix("make"), "v_make");
        assert_eq!(suffix("make"), "make_col");
    }

    #[test]
    fn resolve_prefers_declared_column() {
        let _g = set_default_field_mapper_scoped(Arc::new(snake_case_mapper));
        assert_eq!(resolve_column("briefDescription", ""), "brief_description");
        assert_eq!(resolve_column("briefDescription", "blurb"), "blurb");
    }
}
