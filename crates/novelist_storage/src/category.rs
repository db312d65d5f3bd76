//! Storage buckets.

/// A storage bucket, one directory per category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Category {
    /// World records
    #[display("worlds")]
    Worlds,
    /// Character records
    #[display("characters")]
    Characters,
    /// Plot records
    #[display("plots")]
    Plots,
    /// Chapter prose, keyed `{plot_id}_{index}`
    #[display("chapters")]
    Chapters,
    /// Reports of completed end-to-end runs, keyed by plot id
    #[display("novels")]
    Novels,
}

impl Category {
    /// Directory name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Worlds => "worlds",
            Category::Characters => "characters",
            Category::Plots => "plots",
            Category::Chapters => "chapters",
            Category::Novels => "novels",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "worlds" | "world" => Ok(Category::Worlds),
            "characters" | "character" => Ok(Category::Characters),
            "plots" | "plot" => Ok(Category::Plots),
            "chapters" | "chapter" => Ok(Category::Chapters),
            "novels" | "novel" => Ok(Category::Novels),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}
