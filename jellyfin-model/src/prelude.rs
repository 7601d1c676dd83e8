//! Codec traits plus the records most clients touch.
//! `use jellyfin_model::prelude::*;` is enough to build, encode and decode
//! playback reports and item queries.

pub use jellyfin_codec::prelude::*;

pub use super::items::{BaseItemDto, BaseItemKind, ItemFields, MediaType};
pub use super::media::{MediaSourceInfo, MediaStream, MediaStreamType};
pub use super::playback::{
    PlayMethod, PlaybackInfoDto, PlaybackProgressInfo, PlaybackStartInfo,
    PlaybackStopInfo,
};
pub use super::profiles::{
    DeviceProfile, ProfileCondition, TranscodingProfile,
};
pub use super::session::SessionInfoDto;
pub use super::websocket::{InboundWebSocketMessage, OutboundWebSocketMessage};
