//! Live TV guide queries and recording timers.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc, Weekday};
use jellyfin_codec::{record, wire_enum};
use serde_json::Value;
use uuid::Uuid;

use crate::configuration::NameValuePair;
use crate::items::{BaseItemDto, ImageType, ItemFields, ItemSortBy, SortOrder};

wire_enum! {
    pub enum DayOfWeek {
        Sunday => "Sunday",
        Monday => "Monday",
        Tuesday => "Tuesday",
        Wednesday => "Wednesday",
        Thursday => "Thursday",
        Friday => "Friday",
        Saturday => "Saturday",
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

wire_enum! {
    pub enum DayPattern {
        Daily => "Daily",
        Weekdays => "Weekdays",
        Weekends => "Weekends",
    }
}

impl DayPattern {
    pub fn days(self) -> &'static [DayOfWeek] {
        use DayOfWeek::*;
        match self {
            DayPattern::Daily => DayOfWeek::all(),
            DayPattern::Weekdays => &[Monday, Tuesday, Wednesday, Thursday, Friday],
            DayPattern::Weekends => &[Saturday, Sunday],
        }
    }
}

wire_enum! {
    pub enum KeepUntil {
        UntilDeleted => "UntilDeleted",
        UntilSpaceNeeded => "UntilSpaceNeeded",
        UntilWatched => "UntilWatched",
        UntilDate => "UntilDate",
    }
}

wire_enum! {
    pub enum RecordingStatus {
        New => "New",
        InProgress => "InProgress",
        Completed => "Completed",
        Cancelled => "Cancelled",
        ConflictedOk => "ConflictedOk",
        ConflictedNotOk => "ConflictedNotOk",
        Error => "Error",
    }
}

record! {
    /// A rule that records every matching airing of a series.
    pub struct SeriesTimerInfoDto {
        id: String => "Id",
        timer_type: String => "Type",
        server_id: String => "ServerId",
        external_id: String => "ExternalId",
        channel_id: Uuid => "ChannelId",
        external_channel_id: String => "ExternalChannelId",
        channel_name: String => "ChannelName",
        channel_primary_image_tag: String => "ChannelPrimaryImageTag",
        program_id: String => "ProgramId",
        external_program_id: String => "ExternalProgramId",
        name: String => "Name",
        overview: String => "Overview",
        start_date: DateTime<Utc> => "StartDate",
        end_date: DateTime<Utc> => "EndDate",
        service_name: String => "ServiceName",
        priority: i32 => "Priority",
        pre_padding_seconds: i32 => "PrePaddingSeconds",
        post_padding_seconds: i32 => "PostPaddingSeconds",
        is_pre_padding_required: bool => "IsPrePaddingRequired",
        parent_backdrop_item_id: String => "ParentBackdropItemId",
        parent_backdrop_image_tags: Vec<String> => "ParentBackdropImageTags",
        is_post_padding_required: bool => "IsPostPaddingRequired",
        keep_until: KeepUntil => "KeepUntil",
        record_any_time: bool => "RecordAnyTime",
        skip_episodes_in_library: bool => "SkipEpisodesInLibrary",
        record_any_channel: bool => "RecordAnyChannel",
        keep_up_to: i32 => "KeepUpTo",
        record_new_only: bool => "RecordNewOnly",
        days: Vec<DayOfWeek> => "Days",
        day_pattern: DayPattern => "DayPattern",
        image_tags: BTreeMap<String, String> => "ImageTags",
        parent_thumb_item_id: String => "ParentThumbItemId",
        parent_thumb_image_tag: String => "ParentThumbImageTag",
        parent_primary_image_item_id: Uuid => "ParentPrimaryImageItemId",
        parent_primary_image_tag: String => "ParentPrimaryImageTag",
    }
}

impl SeriesTimerInfoDto {
    /// Whether the timer fires on `at`'s weekday (UTC).
    ///
    /// An explicit `Days` list wins over `DayPattern`; with neither set the
    /// timer records any day.
    pub fn records_on(&self, at: DateTime<Utc>) -> bool {
        let day = DayOfWeek::from(at.weekday());
        match (&self.days, self.day_pattern) {
            (Some(days), _) => days.contains(&day),
            (None, Some(pattern)) => pattern.days().contains(&day),
            (None, None) => true,
        }
    }
}

record! {
    /// A single scheduled recording.
    pub struct TimerInfoDto {
        id: String => "Id",
        timer_type: String => "Type",
        server_id: String => "ServerId",
        external_id: String => "ExternalId",
        channel_id: Uuid => "ChannelId",
        external_channel_id: String => "ExternalChannelId",
        channel_name: String => "ChannelName",
        channel_primary_image_tag: String => "ChannelPrimaryImageTag",
        program_id: String => "ProgramId",
        external_program_id: String => "ExternalProgramId",
        name: String => "Name",
        overview: String => "Overview",
        start_date: DateTime<Utc> => "StartDate",
        end_date: DateTime<Utc> => "EndDate",
        service_name: String => "ServiceName",
        priority: i32 => "Priority",
        pre_padding_seconds: i32 => "PrePaddingSeconds",
        post_padding_seconds: i32 => "PostPaddingSeconds",
        is_pre_padding_required: bool => "IsPrePaddingRequired",
        parent_backdrop_item_id: String => "ParentBackdropItemId",
        parent_backdrop_image_tags: Vec<String> => "ParentBackdropImageTags",
        is_post_padding_required: bool => "IsPostPaddingRequired",
        keep_until: KeepUntil => "KeepUntil",
        status: RecordingStatus => "Status",
        series_timer_id: String => "SeriesTimerId",
        external_series_timer_id: String => "ExternalSeriesTimerId",
        run_time_ticks: i64 => "RunTimeTicks",
        program_info: BaseItemDto => "ProgramInfo",
    }
}

record! {
    /// Guide query body for `POST /LiveTv/Programs`.
    pub struct GetProgramsDto {
        channel_ids: Vec<Uuid> => "ChannelIds",
        user_id: Uuid => "UserId",
        min_start_date: DateTime<Utc> => "MinStartDate",
        has_aired: bool => "HasAired",
        is_airing: bool => "IsAiring",
        max_start_date: DateTime<Utc> => "MaxStartDate",
        min_end_date: DateTime<Utc> => "MinEndDate",
        max_end_date: DateTime<Utc> => "MaxEndDate",
        is_movie: bool => "IsMovie",
        is_series: bool => "IsSeries",
        is_news: bool => "IsNews",
        is_kids: bool => "IsKids",
        is_sports: bool => "IsSports",
        start_index: i32 => "StartIndex",
        limit: i32 => "Limit",
        sort_by: Vec<ItemSortBy> => "SortBy",
        sort_order: Vec<SortOrder> => "SortOrder",
        genres: Vec<String> => "Genres",
        genre_ids: Vec<Uuid> => "GenreIds",
        enable_images: bool => "EnableImages",
        enable_total_record_count: bool => "EnableTotalRecordCount",
        image_type_limit: i32 => "ImageTypeLimit",
        enable_image_types: Vec<ImageType> => "EnableImageTypes",
        enable_user_data: bool => "EnableUserData",
        series_timer_id: String => "SeriesTimerId",
        library_series_id: Uuid => "LibrarySeriesId",
        fields: Vec<ItemFields> => "Fields",
    }
}

impl GetProgramsDto {
    pub fn with_schema_defaults() -> Self {
        Self {
            enable_total_record_count: Some(true),
            ..Self::default()
        }
    }
}

record! {
    /// A guide data source such as Schedules Direct or an XMLTV file.
    pub struct ListingsProviderInfo {
        id: String => "Id",
        provider_type: String => "Type",
        username: String => "Username",
        password: String => "Password",
        listings_id: String => "ListingsId",
        zip_code: String => "ZipCode",
        country: String => "Country",
        path: String => "Path",
        enabled_tuners: Vec<String> => "EnabledTuners",
        enable_all_tuners: bool => "EnableAllTuners",
        news_categories: Vec<String> => "NewsCategories",
        sports_categories: Vec<String> => "SportsCategories",
        kids_categories: Vec<String> => "KidsCategories",
        movie_categories: Vec<String> => "MovieCategories",
        channel_mappings: Vec<NameValuePair> => "ChannelMappings",
        movie_prefix: String => "MoviePrefix",
        preferred_language: String => "PreferredLanguage",
        user_agent: String => "UserAgent",
    }
}

impl ListingsProviderInfo {
    /// Guide channel number mapped to `tuner_channel`, if any.
    pub fn mapped_channel(&self, tuner_channel: &str) -> Option<&str> {
        self.channel_mappings
            .iter()
            .flatten()
            .find(|pair| pair.name.as_deref() == Some(tuner_channel))
            .and_then(|pair| pair.value.as_deref())
    }

    pub fn feeds_tuner(&self, tuner_id: &str) -> bool {
        self.enable_all_tuners == Some(true)
            || self
                .enabled_tuners
                .iter()
                .flatten()
                .any(|enabled| enabled == tuner_id)
    }
}

record! {
    pub struct LiveTvOptions {
        guide_days: i32 => "GuideDays",
        recording_path: String => "RecordingPath",
        movie_recording_path: String => "MovieRecordingPath",
        series_recording_path: String => "SeriesRecordingPath",
        enable_recording_subfolders: bool => "EnableRecordingSubfolders",
        enable_original_audio_with_encoded_recordings: bool =>
            "EnableOriginalAudioWithEncodedRecordings",
        tuner_hosts: Vec<Value> => "TunerHosts",
        listing_providers: Vec<ListingsProviderInfo> => "ListingProviders",
        pre_padding_seconds: i32 => "PrePaddingSeconds",
        post_padding_seconds: i32 => "PostPaddingSeconds",
        media_locations_created: Vec<String> => "MediaLocationsCreated",
        recording_post_processor: String => "RecordingPostProcessor",
        recording_post_processor_arguments: String =>
            "RecordingPostProcessorArguments",
        save_recording_nfo: bool => "SaveRecordingNFO",
        save_recording_images: bool => "SaveRecordingImages",
    }
}
