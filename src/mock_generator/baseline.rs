//! Seed data for the synthetic state

use super::types::{Alarm, AlarmCategory, AlarmSeverity, AlarmStatus, ChartPoint, Statistics};
use crate::display_time;

/// Statistics every simulation starts from
pub fn baseline_statistics() -> Statistics {
    Statistics {
        online_cameras: 24,
        today_visits: 1256,
        alarm_count: 8,
        cpu_usage: 65.0,
        memory_usage: 78.0,
        storage_usage: 45.0,
    }
}

/// Fixed alarm history, newest first
pub fn seed_alarms() -> Vec<Alarm> {
    use AlarmCategory::*;
    use AlarmSeverity::*;
    use AlarmStatus::*;

    [
        ("1", Motion, Medium, "检测到异常移动", "2024-01-15 14:30:25", "前门摄像头", Active),
        ("2", Face, High, "识别到未授权人员", "2024-01-15 14:28:10", "大厅摄像头", Active),
        ("3", Vehicle, Low, "车辆进入停车场", "2024-01-15 14:25:45", "停车场摄像头", Resolved),
        ("4", System, Critical, "摄像头离线", "2024-01-15 14:20:15", "后门摄像头", Active),
        ("5", Motion, Medium, "检测到异常移动", "2024-01-15 14:15:30", "走廊摄像头", Resolved),
    ]
    .into_iter()
    .filter_map(|(id, category, severity, message, time, camera, status)| {
        Some(Alarm {
            id: id.to_string(),
            category,
            severity,
            message: message.to_string(),
            time: display_time::parse(time)?,
            camera: camera.to_string(),
            status,
        })
    })
    .collect()
}

/// Daily traffic/load series shown on the dashboard chart
pub fn chart_series() -> Vec<ChartPoint> {
    [
        ("00:00", 120, 2, 45, 60),
        ("02:00", 80, 1, 40, 55),
        ("04:00", 60, 0, 35, 50),
        ("06:00", 100, 1, 50, 65),
        ("08:00", 300, 3, 70, 80),
        ("10:00", 450, 5, 75, 85),
        ("12:00", 600, 8, 80, 90),
        ("14:00", 550, 6, 75, 85),
        ("16:00", 400, 4, 70, 80),
        ("18:00", 350, 3, 65, 75),
        ("20:00", 250, 2, 60, 70),
        ("22:00", 180, 1, 55, 65),
    ]
    .into_iter()
    .map(|(time, visitors, alerts, cpu, memory)| ChartPoint {
        time: time.to_string(),
        visitors,
        alerts,
        cpu,
        memory,
    })
    .collect()
}
