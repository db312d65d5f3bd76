//! Named record fields that can be regenerated in isolation.
//!
//! Each aspect parses from its field name (`natural_laws`), a spaced or
//! hyphenated human form (`natural laws`), or its Chinese label (`自然法则`).

/// Normalise user input: trim, lowercase, and treat spaces and hyphens as
/// underscores.
fn normalise(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Regenerable aspects of a [`World`](crate::World).
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
pub enum WorldAspect {
    /// Overall setting
    #[display("background")]
    Background,
    /// Physical or magical rules
    #[display("natural_laws")]
    NaturalLaws,
    /// Peoples and customs
    #[display("cultures")]
    Cultures,
    /// Key historical events
    #[display("history")]
    History,
    /// Geography
    #[display("regions")]
    Regions,
    /// Important figures past and present
    #[display("notable_figures")]
    NotableFigures,
    /// Systems of magic
    #[display("magic_systems")]
    MagicSystems,
    /// Level and kinds of technology
    #[display("technologies")]
    Technologies,
}

impl WorldAspect {
    /// Record field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorldAspect::Background => "background",
            WorldAspect::NaturalLaws => "natural_laws",
            WorldAspect::Cultures => "cultures",
            WorldAspect::History => "history",
            WorldAspect::Regions => "regions",
            WorldAspect::NotableFigures => "notable_figures",
            WorldAspect::MagicSystems => "magic_systems",
            WorldAspect::Technologies => "technologies",
        }
    }

    /// Chinese label, also accepted as a JSON key in model responses.
    pub fn label(&self) -> &'static str {
        match self {
            WorldAspect::Background => "背景",
            WorldAspect::NaturalLaws => "自然法则",
            WorldAspect::Cultures => "文化",
            WorldAspect::History => "历史",
            WorldAspect::Regions => "地域",
            WorldAspect::NotableFigures => "重要人物",
            WorldAspect::MagicSystems => "魔法系统",
            WorldAspect::Technologies => "技术",
        }
    }
}

impl std::str::FromStr for WorldAspect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "background" | "背景" => Ok(WorldAspect::Background),
            "natural_laws" | "laws" | "自然法则" => Ok(WorldAspect::NaturalLaws),
            "cultures" | "culture" | "文化" => Ok(WorldAspect::Cultures),
            "history" | "历史" => Ok(WorldAspect::History),
            "regions" | "region" | "geography" | "地域" => Ok(WorldAspect::Regions),
            "notable_figures" | "figures" | "重要人物" => Ok(WorldAspect::NotableFigures),
            "magic_systems" | "magic" | "魔法系统" => Ok(WorldAspect::MagicSystems),
            "technologies" | "technology" | "技术" => Ok(WorldAspect::Technologies),
            _ => Err(format!("Unknown world aspect: {}", s)),
        }
    }
}

/// Regenerable aspects of a [`Character`](crate::Character).
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
pub enum CharacterAspect {
    /// Age, gender, race, occupation, role
    #[display("basic_info")]
    BasicInfo,
    /// Physical description
    #[display("appearance")]
    Appearance,
    /// Traits and behaviour
    #[display("personality")]
    Personality,
    /// Backstory
    #[display("background")]
    Background,
    /// Skills and powers
    #[display("abilities")]
    Abilities,
}

impl CharacterAspect {
    /// Record field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterAspect::BasicInfo => "basic_info",
            CharacterAspect::Appearance => "appearance",
            CharacterAspect::Personality => "personality",
            CharacterAspect::Background => "background",
            CharacterAspect::Abilities => "abilities",
        }
    }

    /// Chinese label, also accepted as a JSON key in model responses.
    pub fn label(&self) -> &'static str {
        match self {
            CharacterAspect::BasicInfo => "基本信息",
            CharacterAspect::Appearance => "外貌",
            CharacterAspect::Personality => "性格",
            CharacterAspect::Background => "背景",
            CharacterAspect::Abilities => "能力",
        }
    }
}

impl std::str::FromStr for CharacterAspect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "basic_info" | "info" | "基本信息" => Ok(CharacterAspect::BasicInfo),
            "appearance" | "looks" | "外貌" => Ok(CharacterAspect::Appearance),
            "personality" | "traits" | "性格" => Ok(CharacterAspect::Personality),
            "background" | "backstory" | "背景" => Ok(CharacterAspect::Background),
            "abilities" | "skills" | "能力" => Ok(CharacterAspect::Abilities),
            _ => Err(format!("Unknown character aspect: {}", s)),
        }
    }
}

/// Regenerable aspects of a [`Plot`](crate::Plot).
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
pub enum PlotAspect {
    /// Story title
    #[display("title")]
    Title,
    /// Era and setting of the story
    #[display("background")]
    Background,
    /// Core storyline
    #[display("main_plot")]
    MainPlot,
    /// Key reversals
    #[display("turning_points")]
    TurningPoints,
    /// Chapter outline
    #[display("chapters")]
    Chapters,
}

impl PlotAspect {
    /// Record field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotAspect::Title => "title",
            PlotAspect::Background => "background",
            PlotAspect::MainPlot => "main_plot",
            PlotAspect::TurningPoints => "turning_points",
            PlotAspect::Chapters => "chapters",
        }
    }

    /// Chinese label, also accepted as a JSON key in model responses.
    pub fn label(&self) -> &'static str {
        match self {
            PlotAspect::Title => "标题",
            PlotAspect::Background => "背景",
            PlotAspect::MainPlot => "主线",
            PlotAspect::TurningPoints => "转折点",
            PlotAspect::Chapters => "章节",
        }
    }
}

impl std::str::FromStr for PlotAspect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "title" | "标题" => Ok(PlotAspect::Title),
            "background" | "setting" | "背景" => Ok(PlotAspect::Background),
            "main_plot" | "main" | "storyline" | "主线" => Ok(PlotAspect::MainPlot),
            "turning_points" | "twists" | "转折点" => Ok(PlotAspect::TurningPoints),
            "chapters" | "outline" | "章节" => Ok(PlotAspect::Chapters),
            _ => Err(format!("Unknown plot aspect: {}", s)),
        }
    }
}
