//! Aggregation engine
//!
//! Turns a flat list of canonical transaction records into the breakdown
//! structure every template and CSV consumes. Pure and total: no I/O, no
//! failure modes, the empty list is a defined zero case.

use chrono::Timelike;
use chrono_tz::Tz;
use serde::Serialize;

use crate::db::TransactionRecord;

/// Full analysis of one record set. Immutable once produced; built fresh
/// per location per run and discarded with the run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub total_revenue: i64,
    pub total_vehicles: u32,
    /// totalRevenue / totalVehicles, 0 for the empty set
    pub avg_service: f64,
    pub payment_breakdown: Vec<PaymentModeStat>,
    pub service_breakdown: Vec<ServiceStat>,
    pub vehicle_distribution: Vec<VehicleTypeStat>,
    /// Only slots with a nonzero count or amount, ascending by hour
    pub hourly_breakdown: Vec<HourlySlot>,
    /// Hourly slot with the highest amount; `None` only for the empty set
    pub peak_hour: Option<PeakHour>,
    /// Service with the highest revenue; `None` only for the empty set
    pub top_service: Option<TopService>,
    pub busy_hour_count: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentModeStat {
    /// Original-case label of the first record seen for this mode
    pub mode: String,
    pub count: u32,
    pub revenue: i64,
    /// Revenue share of totalRevenue, 0 when totalRevenue is 0
    pub percentage: f64,
    /// Populated only for the "upi" mode, first-seen account order
    pub upi_accounts: Vec<UpiAccountStat>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpiAccountStat {
    pub name: String,
    pub count: u32,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStat {
    pub service: String,
    pub count: u32,
    pub revenue: i64,
    pub average_price: f64,
    /// Revenue share of totalRevenue, 0 when totalRevenue is 0
    pub revenue_share: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypeStat {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub count: u32,
    /// Count share of totalVehicles, 0 when totalVehicles is 0
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlySlot {
    /// Local hour in the business timezone, 0..=23
    pub hour: u32,
    /// 12-hour display label, e.g. "10:00 AM"
    pub display: String,
    pub count: u32,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHour {
    pub hour: u32,
    pub display: String,
    pub count: u32,
    pub revenue: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopService {
    pub service: String,
    pub revenue: i64,
}

/// 12-hour label for a 24-hour slot: 0 → "12:00 AM", 13 → "1:00 PM".
fn hour_display(hour: u32) -> String {
    let h12 = if hour % 12 == 0 { 12 } else { hour % 12 };
    let period = if hour < 12 { "AM" } else { "PM" };
    format!("{h12}:00 {period}")
}

struct PaymentAccum {
    key: String,
    label: String,
    count: u32,
    revenue: i64,
    upi_accounts: Vec<UpiAccountStat>,
}

struct ServiceAccum {
    service: String,
    count: u32,
    revenue: i64,
}

struct VehicleAccum {
    vehicle_type: String,
    count: u32,
}

#[derive(Clone, Copy, Default)]
struct HourAccum {
    count: u32,
    amount: i64,
}

/// Aggregate one day's records for one location (or a merged multi-location
/// set) into the full breakdown structure. Hour bucketing converts each
/// record's instant into the business timezone.
pub fn analyze(records: &[TransactionRecord], tz: Tz) -> Analysis {
    let total_revenue: i64 = records.iter().map(|r| r.amount).sum();
    let total_vehicles = records.len() as u32;
    let avg_service = if total_vehicles > 0 {
        total_revenue as f64 / total_vehicles as f64
    } else {
        0.0
    };

    // Single pass over the records: three group-by accumulators plus the
    // fixed 24-slot hourly histogram. Vec accumulators with linear lookup
    // keep first-seen group order, which the tie-breaks below rely on.
    let mut payments: Vec<PaymentAccum> = Vec::new();
    let mut services: Vec<ServiceAccum> = Vec::new();
    let mut vehicles: Vec<VehicleAccum> = Vec::new();
    let mut hours = [HourAccum::default(); 24];

    for rec in records {
        let mode_label = rec
            .payment_mode
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or("Cash");
        let mode_key = mode_label.to_lowercase();
        let idx = match payments.iter().position(|p| p.key == mode_key) {
            Some(i) => i,
            None => {
                payments.push(PaymentAccum {
                    key: mode_key.clone(),
                    label: mode_label.to_string(),
                    count: 0,
                    revenue: 0,
                    upi_accounts: Vec::new(),
                });
                payments.len() - 1
            }
        };
        let payment = &mut payments[idx];
        payment.count += 1;
        payment.revenue += rec.amount;
        if mode_key == "upi" {
            if let Some(account) = rec.upi_account_name.as_deref().filter(|a| !a.is_empty()) {
                match payment.upi_accounts.iter_mut().find(|a| a.name == account) {
                    Some(a) => {
                        a.count += 1;
                        a.amount += rec.amount;
                    }
                    None => payment.upi_accounts.push(UpiAccountStat {
                        name: account.to_string(),
                        count: 1,
                        amount: rec.amount,
                    }),
                }
            }
        }

        let service = rec.service.as_deref().unwrap_or("Unknown");
        match services.iter_mut().find(|s| s.service == service) {
            Some(s) => {
                s.count += 1;
                s.revenue += rec.amount;
            }
            None => services.push(ServiceAccum {
                service: service.to_string(),
                count: 1,
                revenue: rec.amount,
            }),
        }

        let vehicle_type = rec.vehicle_type.as_deref().unwrap_or("Unknown");
        match vehicles.iter_mut().find(|v| v.vehicle_type == vehicle_type) {
            Some(v) => v.count += 1,
            None => vehicles.push(VehicleAccum {
                vehicle_type: vehicle_type.to_string(),
                count: 1,
            }),
        }

        let hour = rec.created_at.with_timezone(&tz).hour() as usize;
        hours[hour].count += 1;
        hours[hour].amount += rec.amount;
    }

    // Top service is selected before sorting: ties go to the group created
    // first, which is the first-encountered service in record order.
    let top_service = services
        .iter()
        .fold(None::<&ServiceAccum>, |best, s| match best {
            Some(b) if b.revenue >= s.revenue => Some(b),
            _ => Some(s),
        })
        .map(|s| TopService {
            service: s.service.clone(),
            revenue: s.revenue,
        });

    let revenue_share = |revenue: i64| {
        if total_revenue > 0 {
            revenue as f64 / total_revenue as f64 * 100.0
        } else {
            0.0
        }
    };

    let payment_breakdown: Vec<PaymentModeStat> = payments
        .into_iter()
        .map(|p| PaymentModeStat {
            mode: p.label,
            count: p.count,
            revenue: p.revenue,
            percentage: revenue_share(p.revenue),
            upi_accounts: p.upi_accounts,
        })
        .collect();

    let mut service_breakdown: Vec<ServiceStat> = services
        .into_iter()
        .map(|s| ServiceStat {
            average_price: s.revenue as f64 / s.count as f64,
            revenue_share: revenue_share(s.revenue),
            service: s.service,
            count: s.count,
            revenue: s.revenue,
        })
        .collect();

    let mut vehicle_distribution: Vec<VehicleTypeStat> = vehicles
        .into_iter()
        .map(|v| VehicleTypeStat {
            percentage: if total_vehicles > 0 {
                v.count as f64 / total_vehicles as f64 * 100.0
            } else {
                0.0
            },
            vehicle_type: v.vehicle_type,
            count: v.count,
        })
        .collect();

    // Stable sorts: equal keys keep first-seen group order. The payment
    // breakdown stays in insertion order.
    service_breakdown.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    vehicle_distribution.sort_by(|a, b| b.count.cmp(&a.count));

    let hourly_breakdown: Vec<HourlySlot> = hours
        .iter()
        .enumerate()
        .filter(|(_, h)| h.count > 0 || h.amount != 0)
        .map(|(hour, h)| HourlySlot {
            hour: hour as u32,
            display: hour_display(hour as u32),
            count: h.count,
            amount: h.amount,
        })
        .collect();

    // First maximum wins: ascending scan with strict greater-than, so equal
    // revenues resolve to the lowest hour.
    let peak_hour = hourly_breakdown
        .iter()
        .fold(None::<&HourlySlot>, |best, slot| match best {
            Some(b) if b.amount >= slot.amount => Some(b),
            _ => Some(slot),
        })
        .map(|slot| PeakHour {
            hour: slot.hour,
            display: slot.display.clone(),
            count: slot.count,
            revenue: slot.amount,
        });

    let busy_hour_count = hourly_breakdown.len() as u32;

    Analysis {
        total_revenue,
        total_vehicles,
        avg_service,
        payment_breakdown,
        service_breakdown,
        vehicle_distribution,
        hourly_breakdown,
        peak_hour,
        top_service,
        busy_hour_count,
    }
}
