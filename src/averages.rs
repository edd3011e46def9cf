use crate::models::{ChannelAverages, Video};

/// Channel means over the videos that report views, CTR and view duration.
/// With no such video every mean is `NaN`, which fails the `> 0` guard of
/// every ratio rule.
pub fn compute_averages(videos: &[Video]) -> ChannelAverages {
    let (views, ctr, duration, count) = videos
        .iter()
        .filter_map(|video| match (video.views, video.ctr, video.avg_view_duration) {
            (Some(views), Some(ctr), Some(duration)) => Some((views, ctr, duration)),
            _ => None,
        })
        .fold(
            (0.0, 0.0, 0.0, 0usize),
            |(views_sum, ctr_sum, duration_sum, count), (views, ctr, duration)| {
                (
                    views_sum + views as f64,
                    ctr_sum + ctr,
                    duration_sum + duration,
                    count + 1,
                )
            },
        );

    if count == 0 {
        return ChannelAverages {
            avg_views: f64::NAN,
            avg_ctr: f64::NAN,
            avg_duration: f64::NAN,
            sample_size: 0,
        };
    }

    let n = count as f64;
    ChannelAverages {
        avg_views: views / n,
        avg_ctr: ctr / n,
        avg_duration: duration / n,
        sample_size: count,
    }
}
