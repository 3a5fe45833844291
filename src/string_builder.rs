//! 语句文本缓冲：只追加，负责片段之间的单空格分隔。

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    /// 写入 `s`；如果不是首次写入，会先写入一个空格。
    pub(crate) fn write_leading(&mut self, s: &str) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push_str(s);
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }

    pub(crate) fn reset(&mut self) {
        self.buf.clear();
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
