/// The five top-level classification segments of the ticketing catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Music,
    Sports,
    ArtsAndTheatre,
    Film,
    Miscellaneous,
}

impl Segment {
    pub const ALL: [Segment; 5] = [
        Segment::Music,
        Segment::Sports,
        Segment::ArtsAndTheatre,
        Segment::Film,
        Segment::Miscellaneous,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Segment::Music => "KZFzniwnSyZfZ7v7nJ",
            Segment::Sports => "KZFzniwnSyZfZ7v7nE",
            Segment::ArtsAndTheatre => "KZFzniwnSyZfZ7v7na",
            Segment::Film => "KZFzniwnSyZfZ7v7nn",
            Segment::Miscellaneous => "KZFzniwnSyZfZ7v7n1",
        }
    }

    /// Lowercase form label, as picked in the search form.
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Music => "music",
            Segment::Sports => "sports",
            Segment::ArtsAndTheatre => "arts & theatre",
            Segment::Film => "film",
            Segment::Miscellaneous => "miscellaneous",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Segment::Music => "Music",
            Segment::Sports => "Sports",
            Segment::ArtsAndTheatre => "Arts & Theatre",
            Segment::Film => "Film",
            Segment::Miscellaneous => "Miscellaneous",
        }
    }

    /// Exact (case-insensitive, trimmed) label lookup. `all` and anything
    /// unrecognized yield `None`.
    pub fn from_label(label: &str) -> Option<Segment> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Loose classification of a free-form category name, matching on
    /// keywords rather than exact labels.
    pub fn classify(raw: &str) -> Option<Segment> {
        let raw = raw.to_lowercase();
        if raw.is_empty() {
            return None;
        }
        if raw.contains("music") {
            Some(Segment::Music)
        } else if raw.contains("sport") {
            Some(Segment::Sports)
        } else if raw.contains("arts") && (raw.contains("theatre") || raw.contains("theater")) {
            Some(Segment::ArtsAndTheatre)
        } else if raw.contains("film") || raw.contains("movie") {
            Some(Segment::Film)
        } else if raw.contains("misc") {
            Some(Segment::Miscellaneous)
        } else {
            None
        }
    }
}
