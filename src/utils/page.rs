//! 数据分页工具

/// 数据分页切片
///
/// # Arguments
/// * `data` - 总数据
/// * `current_page` - 当前页（1 起始）
/// * `size` - 每页数量
///
/// 返回当前页的数据切片副本，越界时返回空集而不是报错。
pub fn data_page<T: Clone>(data: &[T], current_page: usize, size: usize) -> Vec<T> {
    let start = current_page.saturating_sub(1).saturating_mul(size);
    if start >= data.len() {
        return Vec::new();
    }
    let end = start.saturating_add(size).min(data.len());
    data[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_page_of_25_items_is_11_through_20() {
        let data: Vec<u32> = (1..=25).collect();
        let page = data_page(&data, 2, 10);
        assert_eq!(page, (11..=20).collect::<Vec<u32>>());
    }

    #[test]
    fn last_partial_page_is_shorter() {
        let data: Vec<u32> = (1..=25).collect();
        assert_eq!(data_page(&data, 3, 10), (21..=25).collect::<Vec<u32>>());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let data: Vec<u32> = (1..=25).collect();
        assert!(data_page(&data, 4, 10).is_empty());
        assert!(data_page(&data, 100, 10).is_empty());
        assert!(data_page::<u32>(&[], 1, 10).is_empty());
    }

    #[test]
    fn page_zero_behaves_like_page_one() {
        let data: Vec<u32> = (1..=5).collect();
        assert_eq!(data_page(&data, 0, 3), vec![1, 2, 3]);
    }
}
