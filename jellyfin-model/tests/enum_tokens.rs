//! Every wire enumeration round-trips its own tokens and nothing else.

use jellyfin_codec::{WireEnum, json};
use jellyfin_model::configuration::{
    DeinterlaceMethod, DownMixStereoAlgorithms, EncoderPreset,
    HardwareAccelerationType, ImageResolution, ImageSavingConvention,
    SubtitlePlaybackMode, TonemappingAlgorithm, TonemappingMode,
    TonemappingRange,
};
use jellyfin_model::items::{
    BaseItemKind, ChannelType, CollectionType, ExtraType, ImageOrientation,
    ImageType, ItemFields, ItemSortBy, LocationType, MediaType, MetadataField,
    PlayAccess, ProgramAudio, SortOrder,
};
use jellyfin_model::library::EmbeddedSubtitleOptions;
use jellyfin_model::live_tv::{
    DayOfWeek, DayPattern, KeepUntil, RecordingStatus,
};
use jellyfin_model::media::{
    AudioSpatialFormat, IsoType, MediaProtocol, MediaSourceType,
    MediaStreamType, SubtitleDeliveryMethod, TransportStreamTimestamp,
    Video3DFormat, VideoRange, VideoRangeType, VideoType,
};
use jellyfin_model::playback::{PlayMethod, PlaybackOrder, RepeatMode};
use jellyfin_model::profiles::{
    CodecType, DlnaProfileType, EncodingContext, HeaderMatchType,
    MediaStreamProtocol, ProfileConditionType, ProfileConditionValue,
    TranscodeSeekInfo,
};
use jellyfin_model::session::{GeneralCommandType, PlayCommand, PlaystateCommand};
use jellyfin_model::sync_play::{
    GroupRepeatMode, GroupShuffleMode, GroupStateType, GroupUpdateType,
    PlayQueueUpdateReason, PlaybackRequestType, SendCommandType,
};
use jellyfin_model::users::{
    DynamicDayOfWeek, SyncPlayUserAccessType, UnratedItem,
};
use jellyfin_model::websocket::SessionMessageType;
use proptest::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn check_tokens<E>()
where
    E: WireEnum + Serialize + DeserializeOwned,
{
    assert_eq!(E::all().len(), E::TOKENS.len(), "{}", E::NAME);
    for (variant, token) in E::all().iter().zip(E::TOKENS) {
        assert_eq!(variant.as_str(), *token);
        assert_eq!(
            serde_json::to_value(variant).expect("encode"),
            Value::String((*token).to_owned())
        );
        let back: E = json::from_value(&Value::String((*token).to_owned()))
            .expect("decode");
        assert_eq!(back, *variant);
        assert_eq!(token.parse::<E>().expect("parse"), *variant);
    }
}

fn rejects_foreign<E>(token: &str) -> Result<(), TestCaseError>
where
    E: WireEnum + DeserializeOwned,
{
    let decoded = json::from_value::<E>(&Value::String(token.to_owned()));
    if E::TOKENS.iter().any(|declared| *declared == token) {
        prop_assert!(decoded.is_ok());
    } else {
        let err = decoded.expect_err("foreign token");
        prop_assert!(err.is_unknown_enum_token(), "{}: {}", E::NAME, err);
    }
    Ok(())
}

macro_rules! each_enum {
    ($mac:ident $(, $arg:expr)?) => {
        $mac!(
            $($arg,)?
            AudioSpatialFormat, BaseItemKind, ChannelType, CollectionType,
            DayOfWeek, DayPattern, DeinterlaceMethod, DlnaProfileType,
            DownMixStereoAlgorithms, EncoderPreset, EncodingContext,
            ExtraType, GeneralCommandType, GroupRepeatMode, GroupShuffleMode,
            GroupStateType, GroupUpdateType, HardwareAccelerationType,
            ImageOrientation, ImageType, IsoType, ItemFields, ItemSortBy,
            KeepUntil, LocationType, MediaProtocol, MediaSourceType,
            MediaStreamProtocol, MediaStreamType, MediaType, MetadataField,
            PlayAccess, PlayCommand, PlayMethod, PlayQueueUpdateReason,
            PlaybackOrder, PlaybackRequestType, PlaystateCommand,
            ProfileConditionType, ProfileConditionValue, ProgramAudio,
            RecordingStatus, RepeatMode, SendCommandType, SessionMessageType,
            SortOrder, SubtitleDeliveryMethod, SubtitlePlaybackMode,
            TonemappingAlgorithm, TonemappingMode, TonemappingRange,
            TranscodeSeekInfo, TransportStreamTimestamp, Video3DFormat,
            VideoRange, VideoRangeType, VideoType, CodecType, HeaderMatchType,
            ImageResolution, ImageSavingConvention, EmbeddedSubtitleOptions,
            DynamicDayOfWeek, SyncPlayUserAccessType, UnratedItem
        )
    };
}

macro_rules! check_all {
    ($($ty:ty),+) => {
        $( check_tokens::<$ty>(); )+
    };
}

macro_rules! reject_all {
    ($token:expr, $($ty:ty),+) => {
        $( rejects_foreign::<$ty>($token)?; )+
    };
}

#[test]
fn every_enum_round_trips_its_tokens() {
    each_enum!(check_all);
}

#[test]
fn token_case_matters() {
    assert!("movie".parse::<BaseItemKind>().is_err());
    assert!("HTTP".parse::<MediaStreamProtocol>().is_err());
    assert!("Amf".parse::<HardwareAccelerationType>().is_err());
    assert_eq!(
        "AMF".parse::<HardwareAccelerationType>().ok(),
        Some(HardwareAccelerationType::Amf)
    );
}

proptest! {
    #[test]
    fn arbitrary_strings_decode_only_when_declared(
        token in "[A-Za-z0-9]{0,12}"
    ) {
        each_enum!(reject_all, token.as_str());
    }

    #[test]
    fn case_flipped_tokens_are_rejected(
        variant in prop::sample::select(SessionMessageType::all())
    ) {
        let flipped: String = variant
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect();
        prop_assert!(flipped.parse::<SessionMessageType>().is_err());
    }
}
