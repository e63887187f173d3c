use almanac_astro::OutputNaming;
use almanac_config::{AlmanacConfig, DriveSettings};
use almanac_publish::PublishTarget;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// What a run will write and where it will publish, decided before any work.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunPlan {
    pub output_path: PathBuf,
    pub publish: Option<(DriveSettings, PublishTarget)>,
}

/// Publishing runs get a dated file name so each upload is distinct; local
/// runs overwrite the fixed `transit_data.json`.
pub(crate) fn plan_run(
    config: &AlmanacConfig,
    start: NaiveDate,
    output_dir: Option<&Path>,
    output_name: Option<&str>,
    local_only: bool,
) -> RunPlan {
    let publish = config
        .drive
        .clone()
        .filter(|_| !local_only)
        .map(|drive| {
            let target = PublishTarget {
                folder_id: drive.folder_id.clone(),
                name_marker: config.name_marker.clone(),
            };
            (drive, target)
        });

    let naming = if publish.is_some() {
        OutputNaming::Dated
    } else {
        OutputNaming::Fixed
    };
    let file_name = output_name
        .map(str::to_string)
        .unwrap_or_else(|| naming.file_name(start));
    let dir = output_dir.unwrap_or(config.output_dir.as_path());

    RunPlan {
        output_path: dir.join(file_name),
        publish,
    }
}
