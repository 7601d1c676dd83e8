//! What a user may do on the server.

use jellyfin_codec::{record, wire_enum};
use uuid::Uuid;

wire_enum! {
    pub enum SyncPlayUserAccessType {
        CreateAndJoinGroups => "CreateAndJoinGroups",
        JoinGroups => "JoinGroups",
        None => "None",
    }
}

wire_enum! {
    /// Item class blocked when it carries no parental rating.
    pub enum UnratedItem {
        Movie => "Movie",
        Trailer => "Trailer",
        Series => "Series",
        Music => "Music",
        Book => "Book",
        LiveTvChannel => "LiveTvChannel",
        LiveTvProgram => "LiveTvProgram",
        ChannelContent => "ChannelContent",
        Other => "Other",
    }
}

wire_enum! {
    pub enum DynamicDayOfWeek {
        Sunday => "Sunday",
        Monday => "Monday",
        Tuesday => "Tuesday",
        Wednesday => "Wednesday",
        Thursday => "Thursday",
        Friday => "Friday",
        Saturday => "Saturday",
        Everyday => "Everyday",
        Weekday => "Weekday",
        Weekend => "Weekend",
    }
}

record! {
    /// A window in which the user may sign in. Hours are fractional,
    /// `0.0..24.0`.
    pub struct AccessSchedule {
        id: i32 => "Id",
        user_id: Uuid => "UserId",
        day_of_week: DynamicDayOfWeek => "DayOfWeek",
        start_hour: f64 => "StartHour",
        end_hour: f64 => "EndHour",
    }
}

impl AccessSchedule {
    pub fn covers_hour(&self, hour: f64) -> bool {
        match (self.start_hour, self.end_hour) {
            (Some(start), Some(end)) => start <= hour && hour < end,
            _ => false,
        }
    }
}

record! {
    pub struct UserPolicy {
        is_administrator: bool => "IsAdministrator",
        is_hidden: bool => "IsHidden",
        enable_collection_management: bool => "EnableCollectionManagement",
        enable_subtitle_management: bool => "EnableSubtitleManagement",
        enable_lyric_management: bool => "EnableLyricManagement",
        is_disabled: bool => "IsDisabled",
        max_parental_rating: i32 => "MaxParentalRating",
        max_parental_sub_rating: i32 => "MaxParentalSubRating",
        blocked_tags: Vec<String> => "BlockedTags",
        allowed_tags: Vec<String> => "AllowedTags",
        enable_user_preference_access: bool => "EnableUserPreferenceAccess",
        access_schedules: Vec<AccessSchedule> => "AccessSchedules",
        block_unrated_items: Vec<UnratedItem> => "BlockUnratedItems",
        enable_remote_control_of_other_users: bool =>
            "EnableRemoteControlOfOtherUsers",
        enable_shared_device_control: bool => "EnableSharedDeviceControl",
        enable_remote_access: bool => "EnableRemoteAccess",
        enable_live_tv_management: bool => "EnableLiveTvManagement",
        enable_live_tv_access: bool => "EnableLiveTvAccess",
        enable_media_playback: bool => "EnableMediaPlayback",
        enable_audio_playback_transcoding: bool =>
            "EnableAudioPlaybackTranscoding",
        enable_video_playback_transcoding: bool =>
            "EnableVideoPlaybackTranscoding",
        enable_playback_remuxing: bool => "EnablePlaybackRemuxing",
        force_remote_source_transcoding: bool =>
            "ForceRemoteSourceTranscoding",
        enable_content_deletion: bool => "EnableContentDeletion",
        enable_content_deletion_from_folders: Vec<String> =>
            "EnableContentDeletionFromFolders",
        enable_content_downloading: bool => "EnableContentDownloading",
        enable_sync_transcoding: bool => "EnableSyncTranscoding",
        enable_media_conversion: bool => "EnableMediaConversion",
        enabled_devices: Vec<String> => "EnabledDevices",
        enable_all_devices: bool => "EnableAllDevices",
        enabled_channels: Vec<Uuid> => "EnabledChannels",
        enable_all_channels: bool => "EnableAllChannels",
        enabled_folders: Vec<Uuid> => "EnabledFolders",
        enable_all_folders: bool => "EnableAllFolders",
        invalid_login_attempt_count: i32 => "InvalidLoginAttemptCount",
        login_attempts_before_lockout: i32 => "LoginAttemptsBeforeLockout",
        max_active_sessions: i32 => "MaxActiveSessions",
        enable_public_sharing: bool => "EnablePublicSharing",
        blocked_media_folders: Vec<Uuid> => "BlockedMediaFolders",
        blocked_channels: Vec<Uuid> => "BlockedChannels",
        remote_client_bitrate_limit: i32 => "RemoteClientBitrateLimit",
        authentication_provider_id: String => "AuthenticationProviderId",
        password_reset_provider_id: String => "PasswordResetProviderId",
        sync_play_access: SyncPlayUserAccessType => "SyncPlayAccess",
    }
}

impl UserPolicy {
    pub fn with_schema_defaults() -> Self {
        Self {
            enable_collection_management: Some(false),
            enable_subtitle_management: Some(false),
            enable_lyric_management: Some(false),
            ..Self::default()
        }
    }

    /// Whether the policy grants access to `folder`. Explicitly blocked
    /// folders lose even under `EnableAllFolders`.
    pub fn can_access_folder(&self, folder: Uuid) -> bool {
        if self
            .blocked_media_folders
            .as_ref()
            .is_some_and(|blocked| blocked.contains(&folder))
        {
            return false;
        }
        self.enable_all_folders == Some(true)
            || self
                .enabled_folders
                .as_ref()
                .is_some_and(|enabled| enabled.contains(&folder))
    }
}
