use tracing::debug;

use crate::error::Result;
use crate::source::DatasetProvider;

/// Receives patterns for a multi-pattern matcher and finalizes it.
pub trait PatternSetBuilder {
    /// Add one literal pattern.
    fn add_pattern(&mut self, pattern: &str);

    /// Finish construction; called once after the last pattern.
    fn prepare(&mut self);
}

/// A builder that simply collects the patterns it is given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternList {
    patterns: Vec<String>,
    prepared: bool,
}

impl PatternList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl PatternSetBuilder for PatternList {
    fn add_pattern(&mut self, pattern: &str) {
        self.patterns.push(pattern.to_string());
    }

    fn prepare(&mut self) {
        self.prepared = true;
    }
}

/// Returns `true` for lines that carry no pattern.
///
/// A line is a comment when it is empty or when everything before its first
/// `#` is whitespace. A `#` later in a line is part of the pattern.
pub fn is_comment(line: &str) -> bool {
    if line.is_empty() {
        return true;
    }
    match line.find('#') {
        Some(pos) => line[..pos].bytes().all(is_c_space),
        None => false,
    }
}

/// ASCII whitespace as C's `isspace` defines it, vertical tab included.
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// The pattern lines of `text`, in order, with line terminators removed.
pub fn pattern_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !is_comment(line))
}

/// Fetch dataset `name` and feed its patterns into `builder`.
///
/// The builder is prepared even when the dataset holds no patterns.
/// Returns the number of patterns added.
pub fn load_patterns(
    provider: &dyn DatasetProvider,
    name: &str,
    builder: &mut dyn PatternSetBuilder,
) -> Result<usize> {
    let text = provider.fetch(name)?;
    let mut count = 0;
    for pattern in pattern_lines(&text) {
        builder.add_pattern(pattern);
        count += 1;
    }
    builder.prepare();
    debug!(dataset = name, patterns = count, "pattern dataset loaded");
    Ok(count)
}
