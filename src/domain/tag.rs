use std::fmt;

/// Label shown when no tag filter is selected.
pub const ALL_TAGS_LABEL: &str = "Të gjitha";

/// The fixed set of feed categories the app knows how to label.
///
/// The backend may return other tags; those simply have no label here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedTag {
    Aktualitet,
    Sociale,
    Mat,
    Klos,
    Diber,
    Opinion,
    Ekonomi,
    Sport,
}

impl FeedTag {
    pub const ALL: [FeedTag; 8] = [
        FeedTag::Aktualitet,
        FeedTag::Sociale,
        FeedTag::Mat,
        FeedTag::Klos,
        FeedTag::Diber,
        FeedTag::Opinion,
        FeedTag::Ekonomi,
        FeedTag::Sport,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            FeedTag::Aktualitet => "aktualitet",
            FeedTag::Sociale => "sociale",
            FeedTag::Mat => "mat",
            FeedTag::Klos => "klos",
            FeedTag::Diber => "diber",
            FeedTag::Opinion => "opinion",
            FeedTag::Ekonomi => "ekonomi",
            FeedTag::Sport => "sport",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeedTag::Aktualitet => "Aktualitet",
            FeedTag::Sociale => "Sociale",
            FeedTag::Mat => "Mat",
            FeedTag::Klos => "Klos",
            FeedTag::Diber => "Dibër",
            FeedTag::Opinion => "Opinion",
            FeedTag::Ekonomi => "Ekonomi",
            FeedTag::Sport => "Sport",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.slug() == slug)
    }

    /// Label for a selected filter; `None` means "all tags".
    ///
    /// Unknown slugs yield `None` so the caller decides how to show them.
    pub fn label_for(selected: Option<&str>) -> Option<&'static str> {
        match selected {
            None => Some(ALL_TAGS_LABEL),
            Some(slug) => Self::from_slug(slug).map(FeedTag::label),
        }
    }
}

impl fmt::Display for FeedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_has_eight_unique_slugs() {
        let mut slugs: Vec<_> = FeedTag::ALL.iter().map(|t| t.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), 8);
    }

    #[test]
    fn test_slug_round_trip() {
        for tag in FeedTag::ALL {
            assert_eq!(FeedTag::from_slug(tag.slug()), Some(tag));
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(FeedTag::Diber.label(), "Dibër");
        assert_eq!(FeedTag::label_for(Some("sport")), Some("Sport"));
        assert_eq!(FeedTag::label_for(None), Some(ALL_TAGS_LABEL));
        assert_eq!(FeedTag::label_for(Some("weather")), None);
    }
}
