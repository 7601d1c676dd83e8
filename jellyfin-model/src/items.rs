//! Library items and the enumerations that classify them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use jellyfin_codec::{record, wire_enum};
use serde_json::Value;
use uuid::Uuid;

use crate::live_tv::DayOfWeek;
use crate::media::{IsoType, MediaSourceInfo, MediaStream, Video3DFormat, VideoType};

wire_enum! {
    /// Concrete server-side class of a library item.
    pub enum BaseItemKind {
        AggregateFolder => "AggregateFolder",
        Audio => "Audio",
        AudioBook => "AudioBook",
        BasePluginFolder => "BasePluginFolder",
        Book => "Book",
        BoxSet => "BoxSet",
        Channel => "Channel",
        ChannelFolderItem => "ChannelFolderItem",
        CollectionFolder => "CollectionFolder",
        Episode => "Episode",
        Folder => "Folder",
        Genre => "Genre",
        ManualPlaylistsFolder => "ManualPlaylistsFolder",
        Movie => "Movie",
        LiveTvChannel => "LiveTvChannel",
        LiveTvProgram => "LiveTvProgram",
        MusicAlbum => "MusicAlbum",
        MusicArtist => "MusicArtist",
        MusicGenre => "MusicGenre",
        MusicVideo => "MusicVideo",
        Person => "Person",
        Photo => "Photo",
        PhotoAlbum => "PhotoAlbum",
        Playlist => "Playlist",
        PlaylistsFolder => "PlaylistsFolder",
        Program => "Program",
        Recording => "Recording",
        Season => "Season",
        Series => "Series",
        Studio => "Studio",
        Trailer => "Trailer",
        TvChannel => "TvChannel",
        TvProgram => "TvProgram",
        UserRootFolder => "UserRootFolder",
        UserView => "UserView",
        Video => "Video",
        Year => "Year",
    }
}

impl BaseItemKind {
    pub fn is_folder_like(self) -> bool {
        matches!(
            self,
            BaseItemKind::AggregateFolder
                | BaseItemKind::BasePluginFolder
                | BaseItemKind::BoxSet
                | BaseItemKind::CollectionFolder
                | BaseItemKind::Folder
                | BaseItemKind::ManualPlaylistsFolder
                | BaseItemKind::MusicAlbum
                | BaseItemKind::PhotoAlbum
                | BaseItemKind::Playlist
                | BaseItemKind::PlaylistsFolder
                | BaseItemKind::Season
                | BaseItemKind::Series
                | BaseItemKind::UserRootFolder
                | BaseItemKind::UserView
        )
    }
}

wire_enum! {
    pub enum MediaType {
        Unknown => "Unknown",
        Video => "Video",
        Audio => "Audio",
        Photo => "Photo",
        Book => "Book",
    }
}

wire_enum! {
    pub enum CollectionType {
        Unknown => "unknown",
        Movies => "movies",
        TvShows => "tvshows",
        Music => "music",
        MusicVideos => "musicvideos",
        Trailers => "trailers",
        HomeVideos => "homevideos",
        BoxSets => "boxsets",
        Books => "books",
        Photos => "photos",
        LiveTv => "livetv",
        Playlists => "playlists",
        Folders => "folders",
    }
}

wire_enum! {
    pub enum ExtraType {
        Unknown => "Unknown",
        Clip => "Clip",
        Trailer => "Trailer",
        BehindTheScenes => "BehindTheScenes",
        DeletedScene => "DeletedScene",
        Interview => "Interview",
        Scene => "Scene",
        Sample => "Sample",
        ThemeSong => "ThemeSong",
        ThemeVideo => "ThemeVideo",
        Featurette => "Featurette",
        Short => "Short",
    }
}

wire_enum! {
    pub enum PlayAccess {
        Full => "Full",
        None => "None",
    }
}

wire_enum! {
    pub enum LocationType {
        FileSystem => "FileSystem",
        Remote => "Remote",
        Virtual => "Virtual",
        Offline => "Offline",
    }
}

wire_enum! {
    pub enum ChannelType {
        Tv => "TV",
        Radio => "Radio",
    }
}

wire_enum! {
    pub enum ProgramAudio {
        Mono => "Mono",
        Stereo => "Stereo",
        Dolby => "Dolby",
        DolbyDigital => "DolbyDigital",
        Thx => "Thx",
        Atmos => "Atmos",
    }
}

wire_enum! {
    pub enum ImageOrientation {
        TopLeft => "TopLeft",
        TopRight => "TopRight",
        BottomRight => "BottomRight",
        BottomLeft => "BottomLeft",
        LeftTop => "LeftTop",
        RightTop => "RightTop",
        RightBottom => "RightBottom",
        LeftBottom => "LeftBottom",
    }
}

wire_enum! {
    /// Metadata a user locked against refreshes.
    pub enum MetadataField {
        Cast => "Cast",
        Genres => "Genres",
        ProductionLocations => "ProductionLocations",
        Studios => "Studios",
        Tags => "Tags",
        Name => "Name",
        Overview => "Overview",
        Runtime => "Runtime",
        OfficialRating => "OfficialRating",
    }
}

wire_enum! {
    pub enum ImageType {
        Primary => "Primary",
        Art => "Art",
        Backdrop => "Backdrop",
        Banner => "Banner",
        Logo => "Logo",
        Thumb => "Thumb",
        Disc => "Disc",
        Box => "Box",
        Screenshot => "Screenshot",
        Menu => "Menu",
        Chapter => "Chapter",
        BoxRear => "BoxRear",
        Profile => "Profile",
    }
}

wire_enum! {
    /// Optional item fields a query can ask the server to fill in.
    pub enum ItemFields {
        AirTime => "AirTime",
        CanDelete => "CanDelete",
        CanDownload => "CanDownload",
        ChannelInfo => "ChannelInfo",
        Chapters => "Chapters",
        Trickplay => "Trickplay",
        ChildCount => "ChildCount",
        CumulativeRunTimeTicks => "CumulativeRunTimeTicks",
        CustomRating => "CustomRating",
        DateCreated => "DateCreated",
        DateLastMediaAdded => "DateLastMediaAdded",
        DisplayPreferencesId => "DisplayPreferencesId",
        Etag => "Etag",
        ExternalUrls => "ExternalUrls",
        Genres => "Genres",
        ItemCounts => "ItemCounts",
        MediaSourceCount => "MediaSourceCount",
        MediaSources => "MediaSources",
        OriginalTitle => "OriginalTitle",
        Overview => "Overview",
        ParentId => "ParentId",
        Path => "Path",
        People => "People",
        PlayAccess => "PlayAccess",
        ProductionLocations => "ProductionLocations",
        ProviderIds => "ProviderIds",
        PrimaryImageAspectRatio => "PrimaryImageAspectRatio",
        RecursiveItemCount => "RecursiveItemCount",
        Settings => "Settings",
        SeriesStudio => "SeriesStudio",
        SortName => "SortName",
        SpecialEpisodeNumbers => "SpecialEpisodeNumbers",
        Studios => "Studios",
        Taglines => "Taglines",
        Tags => "Tags",
        RemoteTrailers => "RemoteTrailers",
        MediaStreams => "MediaStreams",
        SeasonUserData => "SeasonUserData",
        DateLastRefreshed => "DateLastRefreshed",
        DateLastSaved => "DateLastSaved",
        RefreshState => "RefreshState",
        ChannelImage => "ChannelImage",
        EnableMediaSourceDisplay => "EnableMediaSourceDisplay",
        Width => "Width",
        Height => "Height",
        ExtraIds => "ExtraIds",
        LocalTrailerCount => "LocalTrailerCount",
        IsHd => "IsHD",
        SpecialFeatureCount => "SpecialFeatureCount",
    }
}

wire_enum! {
    pub enum ItemSortBy {
        Default => "Default",
        AiredEpisodeOrder => "AiredEpisodeOrder",
        Album => "Album",
        AlbumArtist => "AlbumArtist",
        Artist => "Artist",
        DateCreated => "DateCreated",
        OfficialRating => "OfficialRating",
        DatePlayed => "DatePlayed",
        PremiereDate => "PremiereDate",
        StartDate => "StartDate",
        SortName => "SortName",
        Name => "Name",
        Random => "Random",
        Runtime => "Runtime",
        CommunityRating => "CommunityRating",
        ProductionYear => "ProductionYear",
        PlayCount => "PlayCount",
        CriticRating => "CriticRating",
        IsFolder => "IsFolder",
        IsUnplayed => "IsUnplayed",
        IsPlayed => "IsPlayed",
        SeriesSortName => "SeriesSortName",
        VideoBitRate => "VideoBitRate",
        AirTime => "AirTime",
        Studio => "Studio",
        IsFavoriteOrLiked => "IsFavoriteOrLiked",
        DateLastContentAdded => "DateLastContentAdded",
        SeriesDatePlayed => "SeriesDatePlayed",
        ParentIndexNumber => "ParentIndexNumber",
        IndexNumber => "IndexNumber",
    }
}

wire_enum! {
    pub enum SortOrder {
        Ascending => "Ascending",
        Descending => "Descending",
    }
}

record! {
    pub struct NameGuidPair {
        name: String => "Name",
        id: Uuid => "Id",
    }
}

record! {
    /// Per-user state of an item: played, favourite, resume position.
    pub struct UserItemDataDto {
        rating: f64 => "Rating",
        played_percentage: f64 => "PlayedPercentage",
        unplayed_item_count: i32 => "UnplayedItemCount",
        playback_position_ticks: i64 => "PlaybackPositionTicks",
        play_count: i32 => "PlayCount",
        is_favorite: bool => "IsFavorite",
        likes: bool => "Likes",
        last_played_date: DateTime<Utc> => "LastPlayedDate",
        played: bool => "Played",
        key: String => "Key",
        item_id: Uuid => "ItemId",
    }
}

record! {
    /// An item as the server describes it to clients.
    ///
    /// Nested schemas this crate does not model (people, chapters, trickplay
    /// manifests, image blur hashes) are kept as raw JSON so that nothing the
    /// server sends is dropped on a decode/encode cycle.
    pub struct BaseItemDto {
        name: String => "Name",
        original_title: String => "OriginalTitle",
        server_id: String => "ServerId",
        id: Uuid => "Id",
        etag: String => "Etag",
        source_type: String => "SourceType",
        playlist_item_id: String => "PlaylistItemId",
        date_created: DateTime<Utc> => "DateCreated",
        date_last_media_added: DateTime<Utc> => "DateLastMediaAdded",
        extra_type: ExtraType => "ExtraType",
        airs_before_season_number: i32 => "AirsBeforeSeasonNumber",
        airs_after_season_number: i32 => "AirsAfterSeasonNumber",
        airs_before_episode_number: i32 => "AirsBeforeEpisodeNumber",
        can_delete: bool => "CanDelete",
        can_download: bool => "CanDownload",
        has_lyrics: bool => "HasLyrics",
        has_subtitles: bool => "HasSubtitles",
        preferred_metadata_language: String => "PreferredMetadataLanguage",
        preferred_metadata_country_code: String => "PreferredMetadataCountryCode",
        container: String => "Container",
        sort_name: String => "SortName",
        forced_sort_name: String => "ForcedSortName",
        video_3d_format: Video3DFormat => "Video3DFormat",
        premiere_date: DateTime<Utc> => "PremiereDate",
        external_urls: Vec<Value> => "ExternalUrls",
        media_sources: Vec<MediaSourceInfo> => "MediaSources",
        critic_rating: f32 => "CriticRating",
        production_locations: Vec<String> => "ProductionLocations",
        path: String => "Path",
        enable_media_source_display: bool => "EnableMediaSourceDisplay",
        official_rating: String => "OfficialRating",
        custom_rating: String => "CustomRating",
        channel_id: Uuid => "ChannelId",
        channel_name: String => "ChannelName",
        overview: String => "Overview",
        taglines: Vec<String> => "Taglines",
        genres: Vec<String> => "Genres",
        community_rating: f32 => "CommunityRating",
        cumulative_run_time_ticks: i64 => "CumulativeRunTimeTicks",
        run_time_ticks: i64 => "RunTimeTicks",
        play_access: PlayAccess => "PlayAccess",
        aspect_ratio: String => "AspectRatio",
        production_year: i32 => "ProductionYear",
        is_place_holder: bool => "IsPlaceHolder",
        number: String => "Number",
        channel_number: String => "ChannelNumber",
        index_number: i32 => "IndexNumber",
        index_number_end: i32 => "IndexNumberEnd",
        parent_index_number: i32 => "ParentIndexNumber",
        remote_trailers: Vec<Value> => "RemoteTrailers",
        provider_ids: BTreeMap<String, String> => "ProviderIds",
        is_hd: bool => "IsHD",
        is_folder: bool => "IsFolder",
        parent_id: Uuid => "ParentId",
        item_type: BaseItemKind => "Type",
        people: Vec<Value> => "People",
        studios: Vec<NameGuidPair> => "Studios",
        genre_items: Vec<NameGuidPair> => "GenreItems",
        parent_logo_item_id: Uuid => "ParentLogoItemId",
        parent_backdrop_item_id: Uuid => "ParentBackdropItemId",
        parent_backdrop_image_tags: Vec<String> => "ParentBackdropImageTags",
        local_trailer_count: i32 => "LocalTrailerCount",
        user_data: UserItemDataDto => "UserData",
        recursive_item_count: i32 => "RecursiveItemCount",
        child_count: i32 => "ChildCount",
        series_name: String => "SeriesName",
        series_id: Uuid => "SeriesId",
        season_id: Uuid => "SeasonId",
        special_feature_count: i32 => "SpecialFeatureCount",
        display_preferences_id: String => "DisplayPreferencesId",
        status: String => "Status",
        air_time: String => "AirTime",
        air_days: Vec<DayOfWeek> => "AirDays",
        tags: Vec<String> => "Tags",
        primary_image_aspect_ratio: f64 => "PrimaryImageAspectRatio",
        artists: Vec<String> => "Artists",
        artist_items: Vec<NameGuidPair> => "ArtistItems",
        album: String => "Album",
        collection_type: CollectionType => "CollectionType",
        display_order: String => "DisplayOrder",
        album_id: Uuid => "AlbumId",
        album_primary_image_tag: String => "AlbumPrimaryImageTag",
        series_primary_image_tag: String => "SeriesPrimaryImageTag",
        album_artist: String => "AlbumArtist",
        album_artists: Vec<NameGuidPair> => "AlbumArtists",
        season_name: String => "SeasonName",
        media_streams: Vec<MediaStream> => "MediaStreams",
        video_type: VideoType => "VideoType",
        part_count: i32 => "PartCount",
        media_source_count: i32 => "MediaSourceCount",
        image_tags: BTreeMap<String, String> => "ImageTags",
        backdrop_image_tags: Vec<String> => "BackdropImageTags",
        screenshot_image_tags: Vec<String> => "ScreenshotImageTags",
        parent_logo_image_tag: String => "ParentLogoImageTag",
        parent_art_item_id: Uuid => "ParentArtItemId",
        parent_art_image_tag: String => "ParentArtImageTag",
        series_thumb_image_tag: String => "SeriesThumbImageTag",
        image_blur_hashes: Value => "ImageBlurHashes",
        series_studio: String => "SeriesStudio",
        parent_thumb_item_id: Uuid => "ParentThumbItemId",
        parent_thumb_image_tag: String => "ParentThumbImageTag",
        parent_primary_image_item_id: Uuid => "ParentPrimaryImageItemId",
        parent_primary_image_tag: String => "ParentPrimaryImageTag",
        chapters: Vec<Value> => "Chapters",
        trickplay: Value => "Trickplay",
        location_type: LocationType => "LocationType",
        iso_type: IsoType => "IsoType",
        media_type: MediaType => "MediaType",
        end_date: DateTime<Utc> => "EndDate",
        locked_fields: Vec<MetadataField> => "LockedFields",
        trailer_count: i32 => "TrailerCount",
        movie_count: i32 => "MovieCount",
        series_count: i32 => "SeriesCount",
        program_count: i32 => "ProgramCount",
        episode_count: i32 => "EpisodeCount",
        song_count: i32 => "SongCount",
        album_count: i32 => "AlbumCount",
        artist_count: i32 => "ArtistCount",
        music_video_count: i32 => "MusicVideoCount",
        lock_data: bool => "LockData",
        width: i32 => "Width",
        height: i32 => "Height",
        camera_make: String => "CameraMake",
        camera_model: String => "CameraModel",
        software: String => "Software",
        exposure_time: f64 => "ExposureTime",
        focal_length: f64 => "FocalLength",
        image_orientation: ImageOrientation => "ImageOrientation",
        aperture: f64 => "Aperture",
        shutter_speed: f64 => "ShutterSpeed",
        latitude: f64 => "Latitude",
        longitude: f64 => "Longitude",
        altitude: f64 => "Altitude",
        iso_speed_rating: i32 => "IsoSpeedRating",
        series_timer_id: String => "SeriesTimerId",
        program_id: String => "ProgramId",
        channel_primary_image_tag: String => "ChannelPrimaryImageTag",
        start_date: DateTime<Utc> => "StartDate",
        completion_percentage: f64 => "CompletionPercentage",
        is_repeat: bool => "IsRepeat",
        episode_title: String => "EpisodeTitle",
        channel_type: ChannelType => "ChannelType",
        audio: ProgramAudio => "Audio",
        is_movie: bool => "IsMovie",
        is_sports: bool => "IsSports",
        is_series: bool => "IsSeries",
        is_live: bool => "IsLive",
        is_news: bool => "IsNews",
        is_kids: bool => "IsKids",
        is_premiere: bool => "IsPremiere",
        timer_id: String => "TimerId",
        normalization_gain: f32 => "NormalizationGain",
        current_program: Box<BaseItemDto> => "CurrentProgram",
    }
}

impl BaseItemDto {
    pub fn with_schema_defaults() -> Self {
        Self {
            media_type: Some(MediaType::Unknown),
            ..Self::default()
        }
    }

    /// Tag of an image of the given type, if the item has one.
    pub fn image_tag(&self, image_type: ImageType) -> Option<&str> {
        self.image_tags
            .as_ref()?
            .get(image_type.as_str())
            .map(String::as_str)
    }
}

record! {
    /// A search result.
    pub struct SearchHint {
        item_id: Uuid => "ItemId",
        id: Uuid => "Id",
        name: String => "Name",
        matched_term: String => "MatchedTerm",
        index_number: i32 => "IndexNumber",
        production_year: i32 => "ProductionYear",
        parent_index_number: i32 => "ParentIndexNumber",
        primary_image_tag: String => "PrimaryImageTag",
        thumb_image_tag: String => "ThumbImageTag",
        thumb_image_item_id: String => "ThumbImageItemId",
        backdrop_image_tag: String => "BackdropImageTag",
        backdrop_image_item_id: String => "BackdropImageItemId",
        item_type: BaseItemKind => "Type",
        is_folder: bool => "IsFolder",
        run_time_ticks: i64 => "RunTimeTicks",
        media_type: MediaType => "MediaType",
        start_date: DateTime<Utc> => "StartDate",
        end_date: DateTime<Utc> => "EndDate",
        series: String => "Series",
        status: String => "Status",
        album: String => "Album",
        album_id: Uuid => "AlbumId",
        album_artist: String => "AlbumArtist",
        artists: Vec<String> => "Artists",
        song_count: i32 => "SongCount",
        episode_count: i32 => "EpisodeCount",
        channel_id: Uuid => "ChannelId",
        channel_name: String => "ChannelName",
        primary_image_aspect_ratio: f64 => "PrimaryImageAspectRatio",
    }
}

impl SearchHint {
    pub fn with_schema_defaults() -> Self {
        Self {
            media_type: Some(MediaType::Unknown),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use jellyfin_codec::{Builder, DecodeErrorKind, Record};
    use serde_json::json;

    use super::*;

    #[test]
    fn is_hd_keeps_its_wire_spelling() {
        let item = BaseItemDto::builder().is_hd(true).build();
        assert_eq!(item.to_json(), json!({"IsHD": true}));
        assert_eq!(BaseItemDto::field("IsHD").map(|f| f.name), Some("is_hd"));
    }

    #[test]
    fn current_program_nests() {
        let channel = BaseItemDto::from_json(&json!({
            "Name": "News 24",
            "Type": "TvChannel",
            "CurrentProgram": {
                "Name": "Evening Bulletin",
                "Type": "LiveTvProgram",
                "IsNews": true,
                "StartDate": "2024-05-01T18:00:00Z"
            }
        }))
        .expect("decode");

        let program = channel.current_program.as_deref().expect("program");
        assert_eq!(program.item_type, Some(BaseItemKind::LiveTvProgram));
        assert_eq!(program.is_news, Some(true));
        assert_eq!(
            program.start_date.map(|d| d.to_rfc3339()),
            Some("2024-05-01T18:00:00+00:00".to_owned())
        );
    }

    #[test]
    fn unmodelled_schemas_survive_round_trip() {
        let doc = json!({
            "Name": "Heat",
            "People": [{"Name": "Al Pacino", "Role": "Vincent Hanna", "Type": "Actor"}],
            "Trickplay": {"abc": {"320": {"Width": 320, "Interval": 10000}}},
            "ImageTags": {"Primary": "f00d"}
        });
        let item = BaseItemDto::from_json(&doc).expect("decode");
        assert_eq!(item.image_tag(ImageType::Primary), Some("f00d"));
        assert_eq!(item.image_tag(ImageType::Logo), None);
        assert_eq!(item.to_json(), doc);
    }

    #[test]
    fn item_kind_rejects_unknown_token() {
        let err = BaseItemDto::from_json(&json!({"Type": "Podcast"}))
            .expect_err("unknown kind");
        assert_eq!(err.path.to_string(), "Type");
        assert!(matches!(
            err.kind,
            DecodeErrorKind::UnknownEnumToken { ref token, .. } if token == "Podcast"
        ));
    }

    #[test]
    fn search_hint_flat_query() {
        let hint = SearchHint::builder()
            .name("Alien")
            .production_year(1979)
            .artists(vec!["Jerry Goldsmith".to_owned()])
            .build();
        assert_eq!(
            hint.to_query_string(None),
            "Name=Alien&ProductionYear=1979&Artists=Jerry%20Goldsmith"
        );
    }
}
