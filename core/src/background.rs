#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PreviewBackground {
    #[default]
    Transparent,
    White,
    Black,
}

impl PreviewBackground {
    pub const ALL: [PreviewBackground; 3] = [
        PreviewBackground::Transparent,
        PreviewBackground::White,
        PreviewBackground::Black,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PreviewBackground::Transparent => "transparent",
            PreviewBackground::White => "white",
            PreviewBackground::Black => "black",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PreviewBackground::Transparent => "Transparent",
            PreviewBackground::White => "White",
            PreviewBackground::Black => "Black",
        }
    }

    pub fn class(self) -> String {
        format!("bg-{}", self.key())
    }

    pub fn from_key(raw: &str) -> Option<PreviewBackground> {
        PreviewBackground::ALL
            .into_iter()
            .find(|background| background.key() == raw.trim())
    }
}
