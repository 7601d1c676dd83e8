//! Jellyfin API records and enumerations.
//!
//! Every type here is declared through `jellyfin_codec`'s `record!` and
//! `wire_enum!` macros, so each one decodes from JSON with located errors,
//! encodes to JSON with unset members omitted, and renders as a query
//! string. The two tagged unions, [`GroupUpdate`] and the WebSocket
//! messages, are serde internally tagged enums.
#![allow(missing_docs)]

pub mod configuration;
pub mod items;
pub mod library;
pub mod live_tv;
pub mod media;
pub mod playback;
pub mod prelude;
pub mod profiles;
pub mod session;
pub mod sync_play;
pub mod system;
pub mod users;
pub mod websocket;

pub use configuration::{
    EncodingOptions, HardwareAccelerationType, NameValuePair,
    NetworkConfiguration, ServerConfiguration, SubtitlePlaybackMode,
    UserConfiguration,
};
pub use items::{
    BaseItemDto, BaseItemKind, ImageType, ItemFields, ItemSortBy, MediaType,
    NameGuidPair, SearchHint, SortOrder, UserItemDataDto,
};
pub use library::LibraryOptions;
pub use live_tv::{
    DayOfWeek, DayPattern, GetProgramsDto, KeepUntil, ListingsProviderInfo,
    LiveTvOptions, SeriesTimerInfoDto, TimerInfoDto,
};
pub use media::{
    MediaAttachment, MediaProtocol, MediaSourceInfo, MediaStream,
    MediaStreamType,
};
pub use playback::{
    PlayMethod, PlaybackInfoDto, PlaybackOrder, PlaybackProgressInfo,
    PlaybackStartInfo, PlaybackStopInfo, PlayerStateInfo, QueueItem,
    RepeatMode,
};
pub use profiles::{
    DeviceProfile, DirectPlayProfile, MediaStreamProtocol, ProfileCondition,
    ProfileConditionType, ProfileConditionValue, TranscodingProfile,
};
pub use session::{
    GeneralCommand, GeneralCommandType, PlayCommand, PlayRequest,
    PlaystateCommand, PlaystateRequest, SessionInfoDto,
};
pub use sync_play::{GroupUpdate, GroupUpdateBody, GroupUpdateType};
pub use system::SystemInfo;
pub use users::UserPolicy;
pub use websocket::{
    InboundWebSocketMessage, MessageBody, OutboundWebSocketMessage,
    SessionMessageType,
};
