// format.rs
//
// 大數字縮寫格式化，用於營收、現金、負債等欄位。

const SCALES: [(f64, &str); 4] = [
    (1e12, "T"),
    (1e9, "B"),
    (1e6, "M"),
    (1e3, "K"),
];

/// 以 T/B/M/K 縮寫格式化數字，保留兩位小數與正負號
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    for (scale, suffix) in SCALES {
        if magnitude >= scale {
            return format!("{:.2}{}", value / scale, suffix);
        }
    }
    format!("{:.2}", value)
}
