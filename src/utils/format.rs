//! 格式化工具
//!
//! 金额、百分比、大数缩写与文本格式化的纯函数实现。

/// 给整数部分插入千分位分隔符
///
/// 入参是不含符号、不含小数点的数字串。
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

/// 格式化金额：插入千分位，保留原有小数位
///
/// `to_thousands(1234567.89)` -> `"1,234,567.89"`
pub fn to_thousands(num: f64) -> String {
    let text = num.to_string();
    let (sign, text) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match text.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
        }
        None => format!("{}{}", sign, group_thousands(text)),
    }
}

/// 格式化绝对值到两位小数并插入千分位
fn fixed_with_separators(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}.{}", group_thousands(int_part), frac_part)
}

/// 格式化金额：两位小数、千分位，负数使用括号表示
///
/// `format_fixed(-1234.5)` -> `"(1,234.50)"`
pub fn format_fixed(value: f64) -> String {
    let formatted = fixed_with_separators(value);
    if value < 0.0 {
        format!("({})", formatted)
    } else {
        formatted
    }
}

/// 格式化百分比数值：两位小数、千分位，保留符号
pub fn format_fixed_rate(value: f64) -> String {
    let formatted = fixed_with_separators(value);
    if value < 0.0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// 绝对值保留两位小数，返回数值
pub fn global_format_fixed(value: f64) -> f64 {
    format!("{:.2}", value.abs()).parse().unwrap_or(0.0)
}

/// 大数单位缩写 (K/M/B/T)
///
/// 不足最小单位步长的值不带小数位（"0"、"999"），
/// 进入 K 及以上单位后保留一位小数（"2.5K"、"1.0M"）。
pub fn number_formatter(value: f64) -> String {
    const UNITS: [char; 4] = ['K', 'M', 'B', 'T'];

    let mut num = value;
    let mut unit = None;
    let mut step = 0;
    while num.abs() >= 1000.0 && step < UNITS.len() {
        num /= 1000.0;
        unit = Some(UNITS[step]);
        step += 1;
    }

    match unit {
        None => format!("{:.0}", num),
        Some(unit) => format!("{:.1}{}", num, unit),
    }
}

/// 类型标签格式化：snake_case -> 空格分隔的首字母大写
///
/// `"single_family"` -> `"Single Family"`
pub fn format_type(value: &str) -> String {
    value
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 获取字符串第一个字母的大写形式
pub fn capitalize_first_letter(value: &str) -> String {
    value
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}

/// 截取内容描述：去掉标记标签后取前 150 个字符
pub fn sub_content_to_description(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut in_tag = false;
    for ch in content.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.chars().take(150).collect()
}

#[cfg(test)]
mod tests;
