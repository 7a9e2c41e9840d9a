/// 四捨六入五成雙（banker's rounding）到小數點後 `digits` 位。
///
/// 報表輸出使用，非有限值原樣回傳。
pub fn round_half_even(x: f64, digits: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }

    // 10^digits 超過 1e22 時拆成兩段，避免乘積溢位
    let (pow1, pow2) = if digits > 22 {
        (10f64.powi((digits - 22) as i32), 1e22)
    } else {
        (10f64.powi(digits as i32), 1.0)
    };

    let y = (x * pow1) * pow2;
    if !y.is_finite() {
        return x;
    }

    let mut z = y.round();
    if (y - z).abs() == 0.5 {
        z = 2.0 * (y / 2.0).round();
    }

    (z / pow2) / pow1
}

/// 報表用格式：先四捨五入，再去除多餘的 0。
pub fn format_rounded(x: f64, digits: u32) -> String {
    let rounded = round_half_even(x, digits);
    if rounded == 0.0 {
        // 去掉 -0
        return "0".to_owned();
    }
    let text = format!("{:.*}", digits as usize, rounded);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    }
}
