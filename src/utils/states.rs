//! 州 / 城市数据整理工具

use std::collections::BTreeMap;

use homepulse_shared::{CityRecord, StateRecord};

/// 州列表合并去重
///
/// 按 `state_id` 去重（保留首次出现的记录），并按 id 升序排列。
pub fn extract_all_states(states: &[StateRecord]) -> Vec<StateRecord> {
    let mut by_id: BTreeMap<i64, &StateRecord> = BTreeMap::new();
    for state in states {
        by_id.entry(state.state_id).or_insert(state);
    }
    by_id.into_values().cloned().collect()
}

/// 城市按州分组
///
/// 返回以 `state_id` 为键的分组，键升序。
pub fn city_by_state(cities: &[CityRecord]) -> BTreeMap<i64, Vec<CityRecord>> {
    let mut groups: BTreeMap<i64, Vec<CityRecord>> = BTreeMap::new();
    for city in cities {
        groups.entry(city.state_id).or_default().push(city.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(id: i64, name: &str) -> StateRecord {
        StateRecord {
            state_id: id,
            state_name: name.to_string(),
        }
    }

    fn city(id: i64, name: &str, state_id: i64) -> CityRecord {
        CityRecord {
            city_id: id,
            city_name: name.to_string(),
            state_id,
        }
    }

    #[test]
    fn extract_all_states_dedups_and_sorts_ascending() {
        let input = vec![
            state(48, "Texas"),
            state(6, "California"),
            state(48, "Texas (dup)"),
            state(12, "Florida"),
            state(6, "California (dup)"),
        ];
        let result = extract_all_states(&input);
        assert_eq!(
            result.iter().map(|s| s.state_id).collect::<Vec<_>>(),
            vec![6, 12, 48]
        );
        // 首次出现的记录保留
        assert_eq!(result[0].state_name, "California");
        assert_eq!(result[2].state_name, "Texas");
    }

    #[test]
    fn extract_all_states_handles_empty_input() {
        assert!(extract_all_states(&[]).is_empty());
    }

    #[test]
    fn city_by_state_groups_by_state_id() {
        let input = vec![
            city(1, "Austin", 48),
            city(2, "Miami", 12),
            city(3, "Dallas", 48),
        ];
        let groups = city_by_state(&input);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&48].len(), 2);
        assert_eq!(groups[&12][0].city_name, "Miami");
        // 键升序
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![12, 48]);
    }
}
