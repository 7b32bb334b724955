/// Citation text reported when no granularity met its threshold.
pub const NO_REFERENCE: &str = "no reference met the threshold";

/// Separator used when joining sentences into chunks, paragraphs, and grounded text.
pub const TEXT_JOINER: &str = " ";
