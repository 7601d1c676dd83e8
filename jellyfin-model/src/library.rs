//! Per-library scan and metadata options.

use jellyfin_codec::{record, wire_enum};
use serde_json::Value;

wire_enum! {
    pub enum EmbeddedSubtitleOptions {
        AllowAll => "AllowAll",
        AllowText => "AllowText",
        AllowImage => "AllowImage",
        AllowNone => "AllowNone",
    }
}

record! {
    pub struct MediaPathInfo {
        path: String => "Path",
    }
}

record! {
    pub struct LibraryOptions {
        enabled: bool => "Enabled",
        enable_photos: bool => "EnablePhotos",
        enable_realtime_monitor: bool => "EnableRealtimeMonitor",
        enable_lufs_scan: bool => "EnableLUFSScan",
        enable_chapter_image_extraction: bool =>
            "EnableChapterImageExtraction",
        extract_chapter_images_during_library_scan: bool =>
            "ExtractChapterImagesDuringLibraryScan",
        enable_trickplay_image_extraction: bool =>
            "EnableTrickplayImageExtraction",
        extract_trickplay_images_during_library_scan: bool =>
            "ExtractTrickplayImagesDuringLibraryScan",
        path_infos: Vec<MediaPathInfo> => "PathInfos",
        save_local_metadata: bool => "SaveLocalMetadata",
        enable_internet_providers: bool => "EnableInternetProviders",
        enable_automatic_series_grouping: bool =>
            "EnableAutomaticSeriesGrouping",
        enable_embedded_titles: bool => "EnableEmbeddedTitles",
        enable_embedded_extras_titles: bool => "EnableEmbeddedExtrasTitles",
        enable_embedded_episode_infos: bool => "EnableEmbeddedEpisodeInfos",
        automatic_refresh_interval_days: i32 =>
            "AutomaticRefreshIntervalDays",
        preferred_metadata_language: String => "PreferredMetadataLanguage",
        metadata_country_code: String => "MetadataCountryCode",
        season_zero_display_name: String => "SeasonZeroDisplayName",
        metadata_savers: Vec<String> => "MetadataSavers",
        disabled_local_metadata_readers: Vec<String> =>
            "DisabledLocalMetadataReaders",
        local_metadata_reader_order: Vec<String> => "LocalMetadataReaderOrder",
        disabled_subtitle_fetchers: Vec<String> => "DisabledSubtitleFetchers",
        subtitle_fetcher_order: Vec<String> => "SubtitleFetcherOrder",
        disabled_media_segment_providers: Vec<String> =>
            "DisabledMediaSegmentProviders",
        media_segment_provider_order: Vec<String> =>
            "MediaSegmentProviderOrder",
        skip_subtitles_if_embedded_subtitles_present: bool =>
            "SkipSubtitlesIfEmbeddedSubtitlesPresent",
        skip_subtitles_if_audio_track_matches: bool =>
            "SkipSubtitlesIfAudioTrackMatches",
        subtitle_download_languages: Vec<String> => "SubtitleDownloadLanguages",
        require_perfect_subtitle_match: bool => "RequirePerfectSubtitleMatch",
        save_subtitles_with_media: bool => "SaveSubtitlesWithMedia",
        save_lyrics_with_media: bool => "SaveLyricsWithMedia",
        save_trickplay_with_media: bool => "SaveTrickplayWithMedia",
        disabled_lyric_fetchers: Vec<String> => "DisabledLyricFetchers",
        lyric_fetcher_order: Vec<String> => "LyricFetcherOrder",
        prefer_nonstandard_artists_tag: bool => "PreferNonstandardArtistsTag",
        use_custom_tag_delimiters: bool => "UseCustomTagDelimiters",
        custom_tag_delimiters: Vec<String> => "CustomTagDelimiters",
        delimiter_whitelist: Vec<String> => "DelimiterWhitelist",
        automatically_add_to_collection: bool =>
            "AutomaticallyAddToCollection",
        allow_embedded_subtitles: EmbeddedSubtitleOptions =>
            "AllowEmbeddedSubtitles",
        type_options: Vec<Value> => "TypeOptions",
    }
}

impl LibraryOptions {
    pub fn with_schema_defaults() -> Self {
        Self {
            path_infos: Some(Vec::new()),
            disabled_local_metadata_readers: Some(Vec::new()),
            disabled_subtitle_fetchers: Some(Vec::new()),
            subtitle_fetcher_order: Some(Vec::new()),
            disabled_media_segment_providers: Some(Vec::new()),
            media_segment_provider_order: Some(Vec::new()),
            save_lyrics_with_media: Some(false),
            save_trickplay_with_media: Some(false),
            disabled_lyric_fetchers: Some(Vec::new()),
            lyric_fetcher_order: Some(Vec::new()),
            prefer_nonstandard_artists_tag: Some(false),
            use_custom_tag_delimiters: Some(false),
            custom_tag_delimiters: Some(Vec::new()),
            delimiter_whitelist: Some(Vec::new()),
            type_options: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Subtitle fetchers in the configured order, minus the disabled ones.
    pub fn active_subtitle_fetchers(&self) -> Vec<&str> {
        let disabled =
            self.disabled_subtitle_fetchers.as_deref().unwrap_or_default();
        self.subtitle_fetcher_order
            .iter()
            .flatten()
            .filter(|name| !disabled.contains(*name))
            .map(String::as_str)
            .collect()
    }
}
