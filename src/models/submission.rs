use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
    Summer,
}

impl Season {
    pub fn all() -> &'static [Season] {
        &[Season::Kharif, Season::Rabi, Season::Summer]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Summer => "Summer",
        }
    }

    /// Value sent in the `season` form field.
    pub fn wire_value(&self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Summer => "summer",
        }
    }

    pub fn months(&self) -> &'static str {
        match self {
            Season::Kharif => "Jun-Oct",
            Season::Rabi => "Nov-Apr",
            Season::Summer => "Mar-Jun",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kharif" | "monsoon" => Some(Season::Kharif),
            "rabi" | "winter" => Some(Season::Rabi),
            "summer" | "zaid" => Some(Season::Summer),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Season::Kharif => Season::Rabi,
            Season::Rabi => Season::Summer,
            Season::Summer => Season::Kharif,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Season::Kharif => Season::Summer,
            Season::Rabi => Season::Kharif,
            Season::Summer => Season::Rabi,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A soil image that passed client-side validation and has been read into memory.
#[derive(Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn size_label(&self) -> String {
        format_size(self.size())
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MIB {
        format!("{:.1} MB", b / MIB)
    } else if b >= KIB {
        format!("{:.0} KB", b / KIB)
    } else {
        format!("{} B", bytes)
    }
}

/// Everything sent in one `POST /api/analyze`. Built fresh per submission.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmSubmission {
    pub image: ImageUpload,
    pub location: String,
    pub season: Season,
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
    pub previous_crop: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_from_str_valid() {
        assert_eq!(Season::from_str("Kharif"), Some(Season::Kharif));
        assert_eq!(Season::from_str("kharif"), Some(Season::Kharif));
        assert_eq!(Season::from_str(" RABI "), Some(Season::Rabi));
        assert_eq!(Season::from_str("zaid"), Some(Season::Summer));
    }

    #[test]
    fn season_from_str_invalid() {
        assert_eq!(Season::from_str("autumn"), None);
        assert_eq!(Season::from_str(""), None);
    }

    #[test]
    fn season_cycles_through_all() {
        let mut season = Season::Kharif;
        for _ in 0..Season::all().len() {
            season = season.next();
        }
        assert_eq!(season, Season::Kharif);
        assert_eq!(Season::Kharif.prev(), Season::Summer);
        assert_eq!(Season::Summer.prev().next(), Season::Summer);
    }

    #[test]
    fn season_wire_value_is_lowercase() {
        for season in Season::all() {
            assert_eq!(season.wire_value(), season.as_str().to_lowercase());
        }
    }

    #[test]
    fn size_labels() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn image_debug_hides_bytes() {
        let image = ImageUpload {
            file_name: "field.jpg".into(),
            mime_type: "image/jpeg".into(),
            bytes: vec![0xFF; 16],
        };
        let debug = format!("{:?}", image);
        assert!(debug.contains("size: 16"));
        assert!(!debug.contains("255"));
    }
}
