use jellyfin_codec::record;
use serde_json::Value;

record! {
    /// Server identity, paths and update state.
    pub struct SystemInfo {
        local_address: String => "LocalAddress",
        server_name: String => "ServerName",
        version: String => "Version",
        product_name: String => "ProductName",
        operating_system: String => "OperatingSystem",
        id: String => "Id",
        startup_wizard_completed: bool => "StartupWizardCompleted",
        operating_system_display_name: String => "OperatingSystemDisplayName",
        package_name: String => "PackageName",
        has_pending_restart: bool => "HasPendingRestart",
        is_shutting_down: bool => "IsShuttingDown",
        supports_library_monitor: bool => "SupportsLibraryMonitor",
        web_socket_port_number: i32 => "WebSocketPortNumber",
        completed_installations: Vec<Value> => "CompletedInstallations",
        can_self_restart: bool => "CanSelfRestart",
        can_launch_web_browser: bool => "CanLaunchWebBrowser",
        program_data_path: String => "ProgramDataPath",
        web_path: String => "WebPath",
        items_by_name_path: String => "ItemsByNamePath",
        cache_path: String => "CachePath",
        log_path: String => "LogPath",
        internal_metadata_path: String => "InternalMetadataPath",
        transcoding_temp_path: String => "TranscodingTempPath",
        cast_receiver_applications: Vec<Value> => "CastReceiverApplications",
        has_update_available: bool => "HasUpdateAvailable",
        encoder_location: String => "EncoderLocation",
        system_architecture: String => "SystemArchitecture",
    }
}

impl SystemInfo {
    pub fn with_schema_defaults() -> Self {
        Self {
            can_self_restart: Some(true),
            can_launch_web_browser: Some(false),
            has_update_available: Some(false),
            encoder_location: Some("System".to_owned()),
            system_architecture: Some("X64".to_owned()),
            ..Self::default()
        }
    }

    /// `Version` split into numeric components, if it parses.
    pub fn version_parts(&self) -> Option<Vec<u32>> {
        self.version
            .as_deref()?
            .split('.')
            .map(|part| part.parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use jellyfin_codec::Record;
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_public_info() {
        let info = SystemInfo::from_json(&json!({
            "ServerName": "den",
            "Version": "10.10.3",
            "Id": "6b1f",
            "StartupWizardCompleted": true,
            "CastReceiverApplications": [{"Id": "F007D354", "Name": "Stable"}]
        }))
        .expect("decode");
        assert_eq!(info.version_parts(), Some(vec![10, 10, 3]));
        assert_eq!(
            info.cast_receiver_applications.as_deref().map(<[_]>::len),
            Some(1)
        );
    }

    #[test]
    fn schema_defaults() {
        assert_eq!(
            SystemInfo::with_schema_defaults().to_json(),
            json!({
                "CanSelfRestart": true,
                "CanLaunchWebBrowser": false,
                "HasUpdateAvailable": false,
                "EncoderLocation": "System",
                "SystemArchitecture": "X64"
            })
        );
    }

    #[test]
    fn unparsable_version() {
        let info = SystemInfo {
            version: Some("10.11.0-rc1".into()),
            ..SystemInfo::default()
        };
        assert_eq!(info.version_parts(), None);
    }
}
