pub mod analysis;
pub mod api;
pub mod background;
pub mod button_group;
pub mod config;
pub mod export;
pub mod history;
pub mod preview;
pub mod raster;
pub mod status;
pub mod store;
pub mod studio;
pub mod tabs;

pub use analysis::{AnalysisData, AnalysisField, AnalysisGatherError, AnalysisKey, AnalysisPanel};
pub use api::{AnalyzeRequest, ApiError, ConvertRequest, GenerateRequest, RefineRequest};
pub use background::PreviewBackground;
pub use button_group::{ButtonGroup, DEFAULT_SELECTION_VALUE, LEVELS};
pub use config::{ModelChoice, StudioConfig};
pub use history::{History, HistoryConfig, HistoryItem, HistoryRow};
pub use preview::{PreviewState, SvgInfo, SvgParser};
pub use raster::{DimensionField, RasterError, RasterSize, SizePolicy};
pub use status::{CallPhase, Channel, Status, Tone};
pub use store::{KeyValueStore, MemoryStore};
pub use studio::{CallError, GuardError, PngDimensionInputs, RefineDraft, Studio, UploadedImage};
pub use tabs::{Tab, TabSet};
