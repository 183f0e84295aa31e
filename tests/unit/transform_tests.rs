//! 数据转换工具的性质测试
//!
//! 用固定种子的随机数生成器构造乱序、含零值的采样，保证结果可复现

use chrono_tz::Tz;
use helianthus::models::{MonthlyStatistics, PowerRecord, PowerStatistics};
use helianthus::utils::{
    calculate_current_power, calculate_monthly_totals, calculate_peak_power,
    calculate_total_production, days_in_month, is_system_active, normalize_monthly_items,
    process_chart_data, watts_to_kilowatts,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// 2024-02-01 00:00:00 UTC
const FEB_1: i64 = 1_706_745_600;

/// 一天内的乱序采样，约三分之一为 0
fn shuffled_day(rng: &mut StdRng, len: usize) -> Vec<PowerRecord> {
    let mut records: Vec<PowerRecord> = (0..len)
        .map(|i| {
            let power = if rng.gen_ratio(1, 3) {
                0.0
            } else {
                f64::from(rng.gen_range(1..5400u32))
            };
            PowerRecord::new(FEB_1 + (i as i64) * 300, power)
        })
        .collect();

    records.shuffle(rng);
    records
}

fn month_stat(year: i32, month: u32, generation: f64) -> MonthlyStatistics {
    MonthlyStatistics {
        system_id: None,
        year,
        month,
        day: 0,
        generation_value: generation,
        full_power_hours_day: generation / 5.4,
        use_value: None,
        grid_value: None,
        buy_value: None,
        income_value: None,
    }
}

#[test]
fn chart_timestamps_are_non_decreasing() {
    let mut rng = StdRng::seed_from_u64(42);
    let tz = Tz::UTC;

    for round in 0..50 {
        let records = shuffled_day(&mut rng, round * 5);
        let chart = process_chart_data(&records, &tz);

        assert_eq!(chart.len(), records.len());
        assert!(chart.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        for point in &chart {
            assert_eq!(point.time.len(), 5);
            assert_eq!(&point.time[..2], point.hour);
        }
    }
}

#[test]
fn chart_keeps_input_order_for_duplicate_timestamps() {
    let records = vec![
        PowerRecord::new(FEB_1 + 300, 1.0),
        PowerRecord::new(FEB_1, 2.0),
        PowerRecord::new(FEB_1 + 300, 3.0),
    ];
    let chart = process_chart_data(&records, &Tz::UTC);
    let powers: Vec<f64> = chart.iter().map(|p| p.power).collect();
    assert_eq!(powers, vec![2.0, 1.0, 3.0]);
}

#[test]
fn peak_is_maximum_and_current_is_latest_positive() {
    let mut rng = StdRng::seed_from_u64(7);

    for round in 1..50 {
        let records = shuffled_day(&mut rng, round * 3);

        let peak = calculate_peak_power(&records).expect("non-empty input");
        assert!(records.iter().all(|r| r.generation_power <= peak));

        let expected_current = records
            .iter()
            .filter(|r| r.generation_power > 0.0)
            .max_by_key(|r| r.date_time)
            .map(|r| r.generation_power)
            .unwrap_or(0.0);
        assert_eq!(calculate_current_power(&records), expected_current);
        assert!(calculate_current_power(&records) <= peak);
    }
}

#[test]
fn all_zero_input_is_inactive() {
    let records: Vec<PowerRecord> = (0..24)
        .map(|i| PowerRecord::new(FEB_1 + i * 300, 0.0))
        .collect();

    assert!(!is_system_active(&records, 10));
    assert_eq!(calculate_current_power(&records), 0.0);
    assert_eq!(calculate_peak_power(&records), Some(0.0));

    assert!(!is_system_active(&[], 10));
    assert_eq!(calculate_current_power(&[]), 0.0);
    assert_eq!(calculate_peak_power(&[]), None);
}

#[test]
fn activity_only_looks_at_trailing_window() {
    let mut records: Vec<PowerRecord> = vec![PowerRecord::new(FEB_1, 900.0)];
    records.extend((1..=10).map(|i| PowerRecord::new(FEB_1 + i * 300, 0.0)));

    assert!(!is_system_active(&records, 10));
    assert!(is_system_active(&records, 11));
    // 当前功率不受窗口限制
    assert_eq!(calculate_current_power(&records), 900.0);
}

#[test]
fn kilowatts_is_plain_division() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let watts = f64::from(rng.gen_range(-10_000..10_000i32));
        assert_eq!(watts_to_kilowatts(watts), watts / 1000.0);
    }
    assert_eq!(watts_to_kilowatts(-250.0), -0.25);
    assert_eq!(watts_to_kilowatts(0.0), 0.0);
}

#[test]
fn leap_february_average_uses_calendar_days() {
    // 只有 20 天有数据，仍按 29 天平均
    let totals = calculate_monthly_totals(&month_stat(2024, 2, 290.0));
    assert_eq!(totals.total_generation, 290.0);
    assert_eq!(totals.avg_daily_generation, 10.0);

    let totals = calculate_monthly_totals(&month_stat(2023, 2, 280.0));
    assert_eq!(totals.avg_daily_generation, 10.0);
}

#[test]
fn days_in_month_matches_calendar() {
    let expected = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    for (i, days) in expected.iter().enumerate() {
        assert_eq!(days_in_month(2024, i as u32 + 1), Some(*days));
    }
    assert_eq!(days_in_month(2100, 2), Some(28));
    assert_eq!(days_in_month(2000, 2), Some(29));
}

#[test]
fn monthly_items_sorted_and_summed() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut items: Vec<PowerStatistics> = (1..=20)
        .map(|day| PowerStatistics {
            system_id: None,
            year: 2024,
            month: 2,
            day,
            generation_value: f64::from(rng.gen_range(0..30u32)),
            full_power_hours_day: 0.0,
            use_value: None,
            grid_value: None,
            buy_value: None,
            charge_value: None,
            discharge_value: None,
            income_value: None,
        })
        .collect();
    items.shuffle(&mut rng);

    let daily = normalize_monthly_items(&items);
    assert_eq!(daily.len(), 20);
    assert!(daily.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(daily[0].date, "2024-02-01");

    let expected: f64 = items.iter().map(|s| s.generation_value).sum();
    assert_eq!(calculate_total_production(&daily), expected);
    assert_eq!(calculate_total_production(&[]), 0.0);
}
