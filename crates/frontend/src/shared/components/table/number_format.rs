//! Утилиты форматирования чисел для таблиц (локаль es-ES)

/// Форматирует число с разделителем тысяч и указанным количеством знаков после запятой
///
/// Как в es-ES: разделитель тысяч `.`, дробной части `,`;
/// группировка включается только начиная с пяти цифр целой части.
///
/// # Примеры
///
/// ```ignore
/// assert_eq!(format_number_es(1234.567, 2), "1234,57");
/// assert_eq!(format_number_es(12345.6, 2), "12.345,60");
/// ```
pub fn format_number_es(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let grouped = if integer_part.len() >= 5 {
        // Вставляем точки каждые 3 цифры с конца целой части
        let mut result = String::new();
        for (i, c) in integer_part.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push('.');
            }
            result.push(c);
        }
        result.chars().rev().collect::<String>()
    } else {
        integer_part.to_string()
    };

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежное/количественное значение: 2 знака после запятой
pub fn format_amount(value: f64) -> String {
    format_number_es(value, 2)
}
