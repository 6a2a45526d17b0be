//! Initial camera roster

use super::types::{Camera, CameraStatus, ConnectionType};
use crate::display_time;

pub fn seed_cameras() -> Vec<Camera> {
    use CameraStatus::*;
    use ConnectionType::*;

    [
        ("1", "前门摄像头", "前门入口", Online, Ip, "1920x1080", 30, "2024-01-15 14:30:25"),
        ("2", "大厅摄像头", "大厅中央", Online, Ptz, "1920x1080", 25, "2024-01-15 14:30:20"),
        ("3", "停车场摄像头", "停车场A区", Online, Ip, "1280x720", 20, "2024-01-15 14:30:15"),
        ("4", "后门摄像头", "后门出口", Offline, Ip, "1920x1080", 30, "2024-01-15 14:20:15"),
        ("5", "走廊摄像头", "一楼走廊", Online, Analog, "1280x720", 25, "2024-01-15 14:30:10"),
        ("6", "电梯摄像头", "电梯内部", Online, Ip, "1920x1080", 30, "2024-01-15 14:30:05"),
        ("7", "办公室摄像头", "办公区域", Error, Ip, "1920x1080", 25, "2024-01-15 14:25:30"),
        ("8", "仓库摄像头", "仓库入口", Online, Ptz, "1920x1080", 20, "2024-01-15 14:30:00"),
    ]
    .into_iter()
    .filter_map(|(id, name, location, status, connection, resolution, fps, last_update)| {
        Some(Camera {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            status,
            connection,
            resolution: resolution.to_string(),
            fps,
            last_update: display_time::parse(last_update)?,
        })
    })
    .collect()
}
