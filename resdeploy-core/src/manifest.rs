//! Deployment manifest — resolves the declared resource mapping against the
//! working folder.

use crate::error::ManifestError;
use crate::settings::Settings;
use crate::types::{DeploymentUnit, QualifiedName, ResourceType};

/// Build the ordered deployment-unit list for `settings`.
///
/// Mapping entries without a corresponding file under the working folder
/// contribute nothing — a skip, not an error. File bytes are captured here
/// and never re-read.
pub fn load_units(settings: &Settings) -> Result<Vec<DeploymentUnit>, ManifestError> {
    let mut units = Vec::new();
    for (file, logical) in &settings.resources {
        let source_path = settings.working_folder.join(file);
        if !source_path.exists() {
            continue;
        }
        let content = std::fs::read(&source_path).map_err(|e| ManifestError::Io {
            path: source_path.clone(),
            source: e,
        })?;
        units.push(DeploymentUnit {
            resource_type: ResourceType::classify(file),
            qualified_name: QualifiedName::new(&settings.prefix, logical),
            logical_name: logical.clone(),
            source_path,
            content,
        });
    }
    Ok(units)
}

/// The qualified names of `units`, in unit order.
///
/// This is the exact filter set for both remote lookups of a run — derived
/// from the units, never independently input.
pub fn qualified_names(units: &[DeploymentUnit]) -> Vec<QualifiedName> {
    units.iter().map(|u| u.qualified_name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn settings_for(dir: &TempDir, resources: &[(&str, &str)]) -> Settings {
        Settings {
            working_folder: dir.path().to_path_buf(),
            crm: "https://org.example".to_string(),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            resources: resources
                .iter()
                .map(|(f, l)| (f.to_string(), l.to_string()))
                .collect::<BTreeMap<_, _>>(),
            prefix: "contoso".to_string(),
        }
    }

    #[test]
    fn missing_files_are_skipped_without_error() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("present.js"), b"var a = 1;").expect("write");

        let settings = settings_for(&dir, &[("present.js", "Present"), ("absent.js", "Absent")]);
        let units = load_units(&settings).expect("load");

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].logical_name, "Present");
    }

    #[test]
    fn unit_captures_content_and_classification() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("site.css"), b"body {}").expect("write");

        let settings = settings_for(&dir, &[("site.css", "SiteStyles")]);
        let units = load_units(&settings).expect("load");

        assert_eq!(units.len(), 1);
        let unit = &units[0];
        assert_eq!(unit.content, b"body {}");
        assert_eq!(unit.resource_type, ResourceType::Css);
        assert_eq!(unit.qualified_name, QualifiedName::from("contoso_SiteStyles"));
        assert_eq!(unit.source_path, dir.path().join("site.css"));
    }

    #[test]
    fn nested_paths_resolve_under_the_working_folder() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("js")).expect("mkdir");
        std::fs::write(dir.path().join("js/login.js"), b"login();").expect("write");

        let settings = settings_for(&dir, &[("js/login.js", "LoginScript")]);
        let units = load_units(&settings).expect("load");

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].resource_type, ResourceType::Js);
        assert_eq!(units[0].source_path, dir.path().join("js").join("login.js"));
    }

    #[test]
    fn units_come_out_in_name_sorted_order() {
        let dir = TempDir::new().expect("tempdir");
        for name in ["b.js", "a.js", "c.js"] {
            std::fs::write(dir.path().join(name), b"x").expect("write");
        }

        let settings = settings_for(&dir, &[("b.js", "B"), ("a.js", "A"), ("c.js", "C")]);
        let units = load_units(&settings).expect("load");

        let files: Vec<PathBuf> = units.iter().map(|u| u.source_path.clone()).collect();
        assert_eq!(
            files,
            vec![
                dir.path().join("a.js"),
                dir.path().join("b.js"),
                dir.path().join("c.js"),
            ]
        );
    }

    #[test]
    fn duplicate_logical_names_yield_two_units_with_one_qualified_name() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("one.js"), b"1").expect("write");
        std::fs::write(dir.path().join("two.js"), b"2").expect("write");

        let settings = settings_for(&dir, &[("one.js", "Shared"), ("two.js", "Shared")]);
        let units = load_units(&settings).expect("load");

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].qualified_name, units[1].qualified_name);
    }

    #[test]
    fn empty_mapping_yields_no_units() {
        let dir = TempDir::new().expect("tempdir");
        let settings = settings_for(&dir, &[]);
        let units = load_units(&settings).expect("load");
        assert!(units.is_empty());
        assert!(qualified_names(&units).is_empty());
    }

    #[test]
    fn qualified_names_follow_unit_order() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("a.js"), b"x").expect("write");
        std::fs::write(dir.path().join("b.css"), b"y").expect("write");

        let settings = settings_for(&dir, &[("a.js", "Alpha"), ("b.css", "Beta")]);
        let units = load_units(&settings).expect("load");

        let names = qualified_names(&units);
        assert_eq!(
            names,
            vec![
                QualifiedName::from("contoso_Alpha"),
                QualifiedName::from("contoso_Beta"),
            ]
        );
    }
}
