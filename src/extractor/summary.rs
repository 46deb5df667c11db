use std::fmt;

/// Outcome counts of one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub written: usize,
    pub skipped: usize,
}

impl ExtractionSummary {
    pub fn merge(&mut self, other: ExtractionSummary) {
        self.written += other.written;
        self.skipped += other.skipped;
    }
}

impl fmt::Display for ExtractionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} written, {} skipped", self.written, self.skipped)
    }
}

/// Replaces characters that cannot appear in a file name
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "_".to_string()
    } else {
        cleaned
    }
}
