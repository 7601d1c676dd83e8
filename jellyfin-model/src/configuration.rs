//! Server and per-user configuration documents.

use jellyfin_codec::{record, wire_enum};
use serde_json::Value;
use uuid::Uuid;

wire_enum! {
    pub enum SubtitlePlaybackMode {
        Default => "Default",
        Always => "Always",
        OnlyForced => "OnlyForced",
        None => "None",
        Smart => "Smart",
    }
}

wire_enum! {
    /// Hardware acceleration back end used by the transcoder.
    pub enum HardwareAccelerationType {
        None => "none",
        Amf => "AMF",
        Qsv => "QSV",
        Nvenc => "NVENC",
        V4l2m2m => "V4L2M2M",
        Vaapi => "VAAPI",
        VideoToolBox => "VideoToolBox",
        Rkmpp => "RKMPP",
    }
}

wire_enum! {
    pub enum EncoderPreset {
        Auto => "auto",
        Placebo => "placebo",
        Veryslow => "veryslow",
        Slower => "slower",
        Slow => "slow",
        Medium => "medium",
        Fast => "fast",
        Faster => "faster",
        Veryfast => "veryfast",
        Superfast => "superfast",
        Ultrafast => "ultrafast",
    }
}

wire_enum! {
    pub enum DeinterlaceMethod {
        Yadif => "yadif",
        Bwdif => "bwdif",
    }
}

wire_enum! {
    pub enum TonemappingAlgorithm {
        None => "none",
        Clip => "clip",
        Linear => "linear",
        Gamma => "gamma",
        Reinhard => "reinhard",
        Hable => "hable",
        Mobius => "mobius",
        Bt2390 => "bt2390",
    }
}

wire_enum! {
    pub enum TonemappingMode {
        Auto => "auto",
        Max => "max",
        Rgb => "rgb",
        Lum => "lum",
        Itp => "itp",
    }
}

wire_enum! {
    pub enum TonemappingRange {
        Auto => "auto",
        Tv => "tv",
        Pc => "pc",
    }
}

wire_enum! {
    pub enum DownMixStereoAlgorithms {
        None => "None",
        Dave750 => "Dave750",
        NightmodeDialogue => "NightmodeDialogue",
        Rfc7845 => "Rfc7845",
        Ac4 => "Ac4",
    }
}

record! {
    /// Playback and display preferences of one user.
    pub struct UserConfiguration {
        audio_language_preference: String => "AudioLanguagePreference",
        play_default_audio_track: bool => "PlayDefaultAudioTrack",
        subtitle_language_preference: String => "SubtitleLanguagePreference",
        display_missing_episodes: bool => "DisplayMissingEpisodes",
        grouped_folders: Vec<Uuid> => "GroupedFolders",
        subtitle_mode: SubtitlePlaybackMode => "SubtitleMode",
        display_collections_view: bool => "DisplayCollectionsView",
        enable_local_password: bool => "EnableLocalPassword",
        ordered_views: Vec<Uuid> => "OrderedViews",
        latest_items_excludes: Vec<Uuid> => "LatestItemsExcludes",
        my_media_excludes: Vec<Uuid> => "MyMediaExcludes",
        hide_played_in_latest: bool => "HidePlayedInLatest",
        remember_audio_selections: bool => "RememberAudioSelections",
        remember_subtitle_selections: bool => "RememberSubtitleSelections",
        enable_next_episode_auto_play: bool => "EnableNextEpisodeAutoPlay",
        cast_receiver_id: String => "CastReceiverId",
    }
}

record! {
    pub struct NetworkConfiguration {
        base_url: String => "BaseUrl",
        enable_https: bool => "EnableHttps",
        require_https: bool => "RequireHttps",
        certificate_path: String => "CertificatePath",
        certificate_password: String => "CertificatePassword",
        internal_http_port: i32 => "InternalHttpPort",
        internal_https_port: i32 => "InternalHttpsPort",
        public_http_port: i32 => "PublicHttpPort",
        public_https_port: i32 => "PublicHttpsPort",
        auto_discovery: bool => "AutoDiscovery",
        enable_upnp: bool => "EnableUPnP",
        enable_ipv4: bool => "EnableIPv4",
        enable_ipv6: bool => "EnableIPv6",
        enable_remote_access: bool => "EnableRemoteAccess",
        local_network_subnets: Vec<String> => "LocalNetworkSubnets",
        local_network_addresses: Vec<String> => "LocalNetworkAddresses",
        known_proxies: Vec<String> => "KnownProxies",
        ignore_virtual_interfaces: bool => "IgnoreVirtualInterfaces",
        virtual_interface_names: Vec<String> => "VirtualInterfaceNames",
        enable_published_server_uri_by_request: bool => "EnablePublishedServerUriByRequest",
        published_server_uri_by_subnet: Vec<String> => "PublishedServerUriBySubnet",
        remote_ip_filter: Vec<String> => "RemoteIPFilter",
        is_remote_ip_filter_blacklist: bool => "IsRemoteIPFilterBlacklist",
    }
}

record! {
    /// Transcoder settings.
    pub struct EncodingOptions {
        encoding_thread_count: i32 => "EncodingThreadCount",
        transcoding_temp_path: String => "TranscodingTempPath",
        fallback_font_path: String => "FallbackFontPath",
        enable_fallback_font: bool => "EnableFallbackFont",
        enable_audio_vbr: bool => "EnableAudioVbr",
        down_mix_audio_boost: f64 => "DownMixAudioBoost",
        down_mix_stereo_algorithm: DownMixStereoAlgorithms => "DownMixStereoAlgorithm",
        max_muxing_queue_size: i32 => "MaxMuxingQueueSize",
        enable_throttling: bool => "EnableThrottling",
        throttle_delay_seconds: i32 => "ThrottleDelaySeconds",
        enable_segment_deletion: bool => "EnableSegmentDeletion",
        segment_keep_seconds: i32 => "SegmentKeepSeconds",
        hardware_acceleration_type: HardwareAccelerationType => "HardwareAccelerationType",
        encoder_app_path: String => "EncoderAppPath",
        encoder_app_path_display: String => "EncoderAppPathDisplay",
        vaapi_device: String => "VaapiDevice",
        qsv_device: String => "QsvDevice",
        enable_tonemapping: bool => "EnableTonemapping",
        enable_vpp_tonemapping: bool => "EnableVppTonemapping",
        enable_video_toolbox_tonemapping: bool => "EnableVideoToolboxTonemapping",
        tonemapping_algorithm: TonemappingAlgorithm => "TonemappingAlgorithm",
        tonemapping_mode: TonemappingMode => "TonemappingMode",
        tonemapping_range: TonemappingRange => "TonemappingRange",
        tonemapping_desat: f64 => "TonemappingDesat",
        tonemapping_peak: f64 => "TonemappingPeak",
        tonemapping_param: f64 => "TonemappingParam",
        vpp_tonemapping_brightness: f64 => "VppTonemappingBrightness",
        vpp_tonemapping_contrast: f64 => "VppTonemappingContrast",
        h264_crf: i32 => "H264Crf",
        h265_crf: i32 => "H265Crf",
        encoder_preset: EncoderPreset => "EncoderPreset",
        deinterlace_double_rate: bool => "DeinterlaceDoubleRate",
        deinterlace_method: DeinterlaceMethod => "DeinterlaceMethod",
        enable_decoding_color_depth10_hevc: bool => "EnableDecodingColorDepth10Hevc",
        enable_decoding_color_depth10_vp9: bool => "EnableDecodingColorDepth10Vp9",
        enable_decoding_color_depth10_hevc_rext: bool => "EnableDecodingColorDepth10HevcRext",
        enable_decoding_color_depth12_hevc_rext: bool => "EnableDecodingColorDepth12HevcRext",
        enable_enhanced_nvdec_decoder: bool => "EnableEnhancedNvdecDecoder",
        prefer_system_native_hw_decoder: bool => "PreferSystemNativeHwDecoder",
        enable_intel_low_power_h264_hw_encoder: bool => "EnableIntelLowPowerH264HwEncoder",
        enable_intel_low_power_hevc_hw_encoder: bool => "EnableIntelLowPowerHevcHwEncoder",
        enable_hardware_encoding: bool => "EnableHardwareEncoding",
        allow_hevc_encoding: bool => "AllowHevcEncoding",
        allow_av1_encoding: bool => "AllowAv1Encoding",
        enable_subtitle_extraction: bool => "EnableSubtitleExtraction",
        hardware_decoding_codecs: Vec<String> => "HardwareDecodingCodecs",
        allow_on_demand_metadata_based_keyframe_extraction_for_extensions: Vec<String> =>
            "AllowOnDemandMetadataBasedKeyframeExtractionForExtensions",
    }
}

impl EncodingOptions {
    /// Whether any hardware back end is selected.
    pub fn uses_hardware_acceleration(&self) -> bool {
        self.hardware_acceleration_type
            .is_some_and(|kind| kind != HardwareAccelerationType::None)
    }
}

wire_enum! {
    pub enum ImageSavingConvention {
        Legacy => "Legacy",
        Compatible => "Compatible",
    }
}

wire_enum! {
    /// Height chapter images are extracted at.
    pub enum ImageResolution {
        MatchSource => "MatchSource",
        P144 => "P144",
        P240 => "P240",
        P360 => "P360",
        P480 => "P480",
        P720 => "P720",
        P1080 => "P1080",
        P1440 => "P1440",
        P2160 => "P2160",
    }
}

record! {
    pub struct NameValuePair {
        name: String => "Name",
        value: String => "Value",
    }
}

record! {
    /// Rewrites a server-side path prefix into one clients can open.
    pub struct PathSubstitution {
        from: String => "From",
        to: String => "To",
    }
}

record! {
    /// Server-wide settings, as returned by `GET /System/Configuration`.
    pub struct ServerConfiguration {
        log_file_retention_days: i32 => "LogFileRetentionDays",
        is_startup_wizard_completed: bool => "IsStartupWizardCompleted",
        cache_path: String => "CachePath",
        previous_version: String => "PreviousVersion",
        previous_version_str: String => "PreviousVersionStr",
        enable_metrics: bool => "EnableMetrics",
        enable_normalized_item_by_name_ids: bool =>
            "EnableNormalizedItemByNameIds",
        is_port_authorized: bool => "IsPortAuthorized",
        quick_connect_available: bool => "QuickConnectAvailable",
        enable_case_sensitive_item_ids: bool => "EnableCaseSensitiveItemIds",
        disable_live_tv_channel_user_data_name: bool =>
            "DisableLiveTvChannelUserDataName",
        metadata_path: String => "MetadataPath",
        preferred_metadata_language: String => "PreferredMetadataLanguage",
        metadata_country_code: String => "MetadataCountryCode",
        sort_replace_characters: Vec<String> => "SortReplaceCharacters",
        sort_remove_characters: Vec<String> => "SortRemoveCharacters",
        sort_remove_words: Vec<String> => "SortRemoveWords",
        min_resume_pct: i32 => "MinResumePct",
        max_resume_pct: i32 => "MaxResumePct",
        min_resume_duration_seconds: i32 => "MinResumeDurationSeconds",
        min_audiobook_resume: i32 => "MinAudiobookResume",
        max_audiobook_resume: i32 => "MaxAudiobookResume",
        inactive_session_threshold: i32 => "InactiveSessionThreshold",
        library_monitor_delay: i32 => "LibraryMonitorDelay",
        library_update_duration: i32 => "LibraryUpdateDuration",
        cache_size: i32 => "CacheSize",
        image_saving_convention: ImageSavingConvention =>
            "ImageSavingConvention",
        metadata_options: Vec<Value> => "MetadataOptions",
        skip_deserialization_for_basic_types: bool =>
            "SkipDeserializationForBasicTypes",
        server_name: String => "ServerName",
        ui_culture: String => "UICulture",
        save_metadata_hidden: bool => "SaveMetadataHidden",
        content_types: Vec<NameValuePair> => "ContentTypes",
        remote_client_bitrate_limit: i32 => "RemoteClientBitrateLimit",
        enable_folder_view: bool => "EnableFolderView",
        enable_grouping_movies_into_collections: bool =>
            "EnableGroupingMoviesIntoCollections",
        enable_grouping_shows_into_collections: bool =>
            "EnableGroupingShowsIntoCollections",
        display_specials_within_seasons: bool => "DisplaySpecialsWithinSeasons",
        codecs_used: Vec<String> => "CodecsUsed",
        plugin_repositories: Vec<Value> => "PluginRepositories",
        enable_external_content_in_suggestions: bool =>
            "EnableExternalContentInSuggestions",
        image_extraction_timeout_ms: i32 => "ImageExtractionTimeoutMs",
        path_substitutions: Vec<PathSubstitution> => "PathSubstitutions",
        enable_slow_response_warning: bool => "EnableSlowResponseWarning",
        slow_response_threshold_ms: i64 => "SlowResponseThresholdMs",
        cors_hosts: Vec<String> => "CorsHosts",
        activity_log_retention_days: i32 => "ActivityLogRetentionDays",
        library_scan_fanout_concurrency: i32 =>
            "LibraryScanFanoutConcurrency",
        library_metadata_refresh_concurrency: i32 =>
            "LibraryMetadataRefreshConcurrency",
        allow_client_log_upload: bool => "AllowClientLogUpload",
        dummy_chapter_duration: i32 => "DummyChapterDuration",
        chapter_image_resolution: ImageResolution => "ChapterImageResolution",
        parallel_image_encoding_limit: i32 => "ParallelImageEncodingLimit",
        cast_receiver_applications: Vec<Value> => "CastReceiverApplications",
        trickplay_options: Value => "TrickplayOptions",
        enable_legacy_authorization: bool => "EnableLegacyAuthorization",
    }
}

impl ServerConfiguration {
    pub fn with_schema_defaults() -> Self {
        Self {
            sort_replace_characters: Some(Vec::new()),
            sort_remove_characters: Some(Vec::new()),
            sort_remove_words: Some(Vec::new()),
            metadata_options: Some(Vec::new()),
            content_types: Some(Vec::new()),
            codecs_used: Some(Vec::new()),
            plugin_repositories: Some(Vec::new()),
            path_substitutions: Some(Vec::new()),
            cors_hosts: Some(Vec::new()),
            cast_receiver_applications: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Applies the first substitution whose `From` prefixes `path`.
    pub fn substitute_path(&self, path: &str) -> Option<String> {
        self.path_substitutions.iter().flatten().find_map(|rule| {
            let rest = path.strip_prefix(rule.from.as_deref()?)?;
            Some(format!("{}{rest}", rule.to.as_deref()?))
        })
    }
}
