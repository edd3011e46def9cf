use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{InputError, InputResult};
use crate::models::Video;

pub const DEFAULT_CHANNEL: &str = "default";

/// Loads a video export, picking the parser from the file extension.
pub fn load_videos(path: &Path) -> InputResult<Vec<Video>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let videos = match extension.as_deref() {
        Some("csv") => read_csv(file)?,
        Some("json") => read_json(file)?,
        _ => {
            return Err(InputError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    tracing::info!(path = %path.display(), videos = videos.len(), "Video export loaded");
    Ok(videos)
}

pub fn read_csv<R: Read>(reader: R) -> InputResult<Vec<Video>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut videos = Vec::new();

    for (index, result) in reader.deserialize::<Video>().enumerate() {
        let video = result?;
        // Header is line 1.
        check(&video, index + 2)?;
        videos.push(video);
    }

    check_duplicates(&videos)?;
    Ok(videos)
}

pub fn read_json<R: Read>(reader: R) -> InputResult<Vec<Video>> {
    let videos: Vec<Video> = serde_json::from_reader(reader)?;
    for (index, video) in videos.iter().enumerate() {
        check(video, index + 1)?;
    }
    check_duplicates(&videos)?;
    Ok(videos)
}

fn check(video: &Video, row: usize) -> InputResult<()> {
    if video.id.trim().is_empty() {
        return Err(InputError::MissingId { row });
    }
    video.validate()
}

fn check_duplicates(videos: &[Video]) -> InputResult<()> {
    let mut seen = HashSet::new();
    for video in videos {
        let channel_id = channel_of(video);
        if !seen.insert((channel_id, video.id.as_str())) {
            return Err(InputError::DuplicateVideo {
                video_id: video.id.clone(),
                channel_id: channel_id.to_string(),
            });
        }
    }
    Ok(())
}

fn channel_of(video: &Video) -> &str {
    video.channel_id.as_deref().unwrap_or(DEFAULT_CHANNEL)
}

/// Groups videos by channel, keeping first-seen channel order and the
/// input order inside each channel.
pub fn group_by_channel(videos: Vec<Video>) -> Vec<(String, Vec<Video>)> {
    let mut groups: Vec<(String, Vec<Video>)> = Vec::new();

    for video in videos {
        let channel_id = channel_of(&video).to_string();
        match groups.iter_mut().find(|(id, _)| *id == channel_id) {
            Some((_, group)) => group.push(video),
            None => groups.push((channel_id, vec![video])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
id,channel_id,title,published_at,views,likes,comments,ctr,avg_view_duration,thumbnail_url
a1,alpha,How to knead dough,2024-01-03T15:00:00Z,1200,80,12,0.05,240,https://cdn/a1.jpg
a2,alpha,,,,,,,,
b1,beta,Top 5 ovens,2024-01-04T09:30:00+02:00,900,,,0.04,400.5,
";

    #[test]
    fn reads_csv_with_empty_cells_as_missing() {
        let videos = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(videos.len(), 3);

        let first = &videos[0];
        assert_eq!(first.channel_id.as_deref(), Some("alpha"));
        assert_eq!(first.views, Some(1200));
        assert_eq!(first.ctr, Some(0.05));
        assert!(first.published_at.is_some());

        let bare = &videos[1];
        assert_eq!(bare.title, None);
        assert_eq!(bare.published_at, None);
        assert_eq!(bare.views, None);
        assert_eq!(bare.thumbnail_url, None);

        let offset = videos[2].published_at.unwrap();
        assert_eq!(offset.to_rfc3339(), "2024-01-04T07:30:00+00:00");
    }

    #[test]
    fn rejects_out_of_range_ctr() {
        let csv = "id,ctr\nv1,1.5\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::InvalidMetric { field: "ctr", .. }));
    }

    #[test]
    fn rejects_duplicate_ids_within_a_channel() {
        let json = r#"[{"id": "v1"}, {"id": "v1", "channel_id": "other"}, {"id": "v1"}]"#;
        let err = read_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::DuplicateVideo { ref channel_id, .. } if channel_id == DEFAULT_CHANNEL));
    }

    #[test]
    fn rejects_blank_ids() {
        let json = r#"[{"id": "v1"}, {"id": "  "}]"#;
        let err = read_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::MissingId { row: 2 }));
    }

    #[test]
    fn loads_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("videos.json");
        let mut file = File::create(&json_path).unwrap();
        write!(file, r#"[{{"id": "v1", "views": 10, "title": "Why"}}]"#).unwrap();
        let videos = load_videos(&json_path).unwrap();
        assert_eq!(videos[0].views, Some(10));

        let csv_path = dir.path().join("videos.CSV");
        std::fs::write(&csv_path, CSV).unwrap();
        assert_eq!(load_videos(&csv_path).unwrap().len(), 3);

        let txt_path = dir.path().join("videos.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(matches!(
            load_videos(&txt_path),
            Err(InputError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn groups_preserve_order() {
        let videos = read_csv(CSV.as_bytes()).unwrap();
        let mut extra = Video::new("z1");
        extra.channel_id = None;

        let mut all = videos;
        all.insert(1, extra);
        let groups = group_by_channel(all);

        let names: Vec<&str> = groups.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(names, vec!["alpha", DEFAULT_CHANNEL, "beta"]);
        let alpha: Vec<&str> = groups[0].1.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(alpha, vec!["a1", "a2"]);
    }
}
