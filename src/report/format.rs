use crate::ranking::RankedCrop;

/// Whole-second duration in the farm's own wording: `45秒`, `3分20秒`,
/// `5分钟`, `2小时15分`, `4小时`.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.round().max(0.0) as u64;
    if total < 60 {
        return format!("{total}秒");
    }
    let minutes = total / 60;
    let rest = total % 60;
    if minutes < 60 {
        return if rest > 0 {
            format!("{minutes}分{rest}秒")
        } else {
            format!("{minutes}分钟")
        };
    }
    let hours = minutes / 60;
    let minutes = minutes % 60;
    if minutes > 0 {
        format!("{hours}小时{minutes}分")
    } else {
        format!("{hours}小时")
    }
}

/// Growth time as shown next to a crop. Multi-season crops show the total
/// over all seasons.
pub fn grow_label(row: &RankedCrop, fertilized: bool) -> String {
    let seasons = row.crop.seasons;
    if seasons > 1 {
        return format!("{} (共{seasons}季)", format_duration(row.total_grow(fertilized)));
    }
    if fertilized {
        return format_duration(row.total_grow_seconds_fertilized);
    }
    match &row.crop.grow_time_label {
        Some(label) => label.clone(),
        None => format_duration(row.total_grow_seconds),
    }
}

/// Rounded integer with `,` between thousands.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
