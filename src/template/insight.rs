//! Template 3 — business-intelligence variant
//!
//! Transaction-centric wording, KPI tiles and CSS-proportional charts in
//! place of the tabular layouts of the other two templates.

use super::{ReportView, escape_html};
use crate::util::group_thousands;

const GRADIENTS: &[&str] = &[
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)",
    "linear-gradient(135deg, #fa709a 0%, #fee140 100%)",
];

pub fn render(view: &ReportView<'_>) -> String {
    let analysis = view.analysis;

    let peak_hour_label = analysis
        .peak_hour
        .as_ref()
        .map(|p| p.display.clone())
        .unwrap_or_else(|| "N/A".to_string());
    let peak_hour_revenue = analysis.peak_hour.as_ref().map(|p| p.revenue).unwrap_or(0);
    let top_service_label = analysis
        .top_service
        .as_ref()
        .map(|t| escape_html(&t.service))
        .unwrap_or_else(|| "N/A".to_string());
    let top_service_revenue = analysis.top_service.as_ref().map(|t| t.revenue).unwrap_or(0);

    let mut payment_cards = String::new();
    for (idx, item) in analysis.payment_breakdown.iter().enumerate() {
        let gradient = GRADIENTS[idx % GRADIENTS.len()];

        let upi_breakdown = if item.upi_accounts.is_empty() {
            String::new()
        } else {
            let mut upi_rows = String::new();
            for account in &item.upi_accounts {
                let share = if item.revenue > 0 {
                    account.amount as f64 / item.revenue as f64 * 100.0
                } else {
                    0.0
                };
                upi_rows.push_str(&format!(
                    r#"<div style="background: linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%); padding: 14px 18px; border-radius: 8px; margin-top: 10px;">
                  <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px;">
                    <span style="font-weight: 700; color: #2c3e50; font-size: 14px;">{name}</span>
                    <span style="background: {gradient}; color: white; padding: 3px 10px; border-radius: 12px; font-size: 11px; font-weight: 700;">{share:.1}%</span>
                  </div>
                  <div style="display: flex; justify-content: space-between; font-size: 13px; color: #555;">
                    <span style="font-weight: 600;">💰 ₹{amount}</span>
                    <span style="font-weight: 600;">🔢 {count} txns</span>
                  </div>
                  <div style="background-color: #dee2e6; height: 4px; border-radius: 2px; overflow: hidden; margin-top: 8px;">
                    <div style="background: {gradient}; height: 100%; width: {share}%; border-radius: 2px;"></div>
                  </div>
                </div>
"#,
                    name = escape_html(&account.name),
                    amount = group_thousands(account.amount),
                    count = account.count,
                ));
            }
            format!(
                r#"<div style="margin-top: 18px; padding-top: 18px; border-top: 2px solid #e9ecef;">
              <div style="font-weight: 700; color: #2c3e50; font-size: 14px; margin-bottom: 12px;">UPI Account Performance</div>
              {upi_rows}
            </div>
"#,
            )
        };

        payment_cards.push_str(&format!(
            r#"<div style="background: white; padding: 26px; border-radius: 14px; box-shadow: 0 4px 16px rgba(0,0,0,0.1); border: 1px solid #e9ecef;">
          <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;">
            <h3 style="margin: 0; color: #2c3e50; font-size: 19px; font-weight: 700;">{mode}</h3>
            <span style="background: {gradient}; color: white; padding: 5px 14px; border-radius: 14px; font-size: 12px; font-weight: 700;">{pct:.1}%</span>
          </div>
          <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 14px;">
            <div>
              <div style="color: #95a5a6; font-size: 11px; text-transform: uppercase; letter-spacing: 1px; font-weight: 700;">Revenue</div>
              <div style="color: #2c3e50; font-size: 24px; font-weight: 800; margin-top: 4px;">₹{revenue}</div>
            </div>
            <div style="text-align: right;">
              <div style="color: #95a5a6; font-size: 11px; text-transform: uppercase; letter-spacing: 1px; font-weight: 700;">Transactions</div>
              <div style="color: #2c3e50; font-size: 24px; font-weight: 800; margin-top: 4px;">{count}</div>
            </div>
          </div>
          {upi_breakdown}
        </div>
"#,
            mode = escape_html(&item.mode),
            pct = item.percentage,
            revenue = group_thousands(item.revenue),
            count = item.count,
        ));
    }

    let mut service_rows = String::new();
    for (idx, item) in analysis.service_breakdown.iter().enumerate() {
        let gradient = GRADIENTS[idx % GRADIENTS.len()];
        service_rows.push_str(&format!(
            r#"<tr>
              <td style="padding: 16px; border-bottom: 1px solid #e9ecef; font-weight: 600; color: #2c3e50;">{service}</td>
              <td style="padding: 16px; border-bottom: 1px solid #e9ecef; text-align: center; color: #555;">{count}</td>
              <td style="padding: 16px; border-bottom: 1px solid #e9ecef; text-align: right; font-weight: 700; color: #2c3e50;">₹{revenue}</td>
              <td style="padding: 16px; border-bottom: 1px solid #e9ecef; text-align: right; color: #555;">₹{avg}</td>
              <td style="padding: 16px; border-bottom: 1px solid #e9ecef;">
                <div style="background-color: #e9ecef; height: 6px; border-radius: 3px; overflow: hidden;">
                  <div style="background: {gradient}; height: 100%; width: {share}%; border-radius: 3px;"></div>
                </div>
              </td>
            </tr>
"#,
            service = escape_html(&item.service),
            count = item.count,
            revenue = group_thousands(item.revenue),
            avg = item.average_price.round() as i64,
            share = item.revenue_share,
        ));
    }

    let mut vehicle_bars = String::new();
    for (idx, item) in analysis.vehicle_distribution.iter().enumerate() {
        let gradient = GRADIENTS[idx % GRADIENTS.len()];
        vehicle_bars.push_str(&format!(
            r#"<div style="margin-bottom: 14px;">
          <div style="display: flex; justify-content: space-between; margin-bottom: 6px;">
            <span style="font-weight: 700; color: #2c3e50; font-size: 14px;">{vtype}</span>
            <span style="color: #7f8c8d; font-size: 13px; font-weight: 600;">{count} • {pct:.1}%</span>
          </div>
          <div style="background-color: #e9ecef; height: 10px; border-radius: 5px; overflow: hidden;">
            <div style="background: {gradient}; height: 100%; width: {pct}%; border-radius: 5px;"></div>
          </div>
        </div>
"#,
            vtype = escape_html(&item.vehicle_type),
            count = item.count,
            pct = item.percentage,
        ));
    }

    let max_amount = analysis
        .hourly_breakdown
        .iter()
        .map(|h| h.amount)
        .max()
        .unwrap_or(1)
        .max(1);
    let mut hourly_bars = String::new();
    for item in &analysis.hourly_breakdown {
        let is_peak = analysis
            .peak_hour
            .as_ref()
            .is_some_and(|p| p.hour == item.hour);
        let height = (item.amount.max(0) as f64 / max_amount as f64 * 100.0).clamp(0.0, 100.0);
        let bar_style = if is_peak {
            "background: linear-gradient(180deg, #43e97b 0%, #38f9d7 100%)"
        } else {
            "background: linear-gradient(180deg, #667eea 0%, #764ba2 100%)"
        };
        hourly_bars.push_str(&format!(
            r#"<div style="flex: 1; min-width: 56px; text-align: center;">
            <div style="height: 120px; display: flex; align-items: flex-end; justify-content: center; margin-bottom: 8px;">
              <div style="width: 100%; {bar_style}; border-radius: 6px 6px 0 0; height: {height:.0}%; min-height: 3px;"></div>
            </div>
            <div style="font-size: 11px; color: #7f8c8d; font-weight: 600;">{display}</div>
            <div style="font-size: 12px; color: #2c3e50; font-weight: 700;">₹{amount}</div>
          </div>
"#,
            display = item.display,
            amount = group_thousands(item.amount),
        ));
    }

    let comparison_section = if view.comparison.len() > 1 {
        let mut rows = String::new();
        for (idx, share) in view.comparison.iter().enumerate() {
            let gradient = GRADIENTS[idx % GRADIENTS.len()];
            rows.push_str(&format!(
                r#"<div style="margin-bottom: 14px;">
          <div style="display: flex; justify-content: space-between; margin-bottom: 6px;">
            <span style="font-weight: 700; color: #2c3e50; font-size: 14px;">{name}</span>
            <span style="color: #7f8c8d; font-size: 13px; font-weight: 600;">₹{revenue} • {vehicles} txns • {pct:.1}%</span>
          </div>
          <div style="background-color: #e9ecef; height: 10px; border-radius: 5px; overflow: hidden;">
            <div style="background: {gradient}; height: 100%; width: {pct}%; border-radius: 5px;"></div>
          </div>
        </div>
"#,
                name = escape_html(&share.location_name),
                revenue = group_thousands(share.revenue),
                vehicles = share.vehicles,
                pct = share.revenue_share,
            ));
        }
        format!(
            r#"<div style="margin-bottom: 44px;">
        <h2 style="color: #2c3e50; font-size: 22px; margin: 0 0 18px 0; font-weight: 800;">🏢 Location Performance</h2>
        <div style="background: white; padding: 26px; border-radius: 14px; box-shadow: 0 4px 16px rgba(0,0,0,0.1); border: 1px solid #e9ecef;">
          {rows}
        </div>
      </div>
"#,
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Business Intelligence Report</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #eef1f6;">
  <div style="max-width: 900px; margin: 40px auto; background-color: #ffffff; border-radius: 16px; overflow: hidden; box-shadow: 0 8px 32px rgba(0,0,0,0.12);">

    <div style="background: linear-gradient(135deg, #1a202c 0%, #2d3748 60%, #4a5568 100%); color: white; padding: 44px 36px; text-align: center;">
      <h1 style="margin: 0; font-size: 32px; font-weight: 800; letter-spacing: -0.5px;">📈 Business Intelligence Report</h1>
      <p style="margin: 14px 0 0 0; font-size: 17px; opacity: 0.9;">{date}</p>
      <p style="margin: 4px 0 0 0; font-size: 14px; opacity: 0.75;">📍 {location}</p>
    </div>

    <div style="padding: 36px;">

      <div style="display: grid; grid-template-columns: repeat(4, 1fr); gap: 18px; margin-bottom: 44px;">
        <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 22px; border-radius: 14px; text-align: center;">
          <div style="font-size: 11px; text-transform: uppercase; letter-spacing: 1px; opacity: 0.9; font-weight: 700;">Total Revenue</div>
          <div style="font-size: 28px; font-weight: 800; margin-top: 8px;">₹{total_revenue}</div>
        </div>
        <div style="background: linear-gradient(135deg, #f093fb 0%, #f5576c 100%); color: white; padding: 22px; border-radius: 14px; text-align: center;">
          <div style="font-size: 11px; text-transform: uppercase; letter-spacing: 1px; opacity: 0.9; font-weight: 700;">Transactions</div>
          <div style="font-size: 28px; font-weight: 800; margin-top: 8px;">{total_vehicles}</div>
        </div>
        <div style="background: linear-gradient(135deg, #4facfe 0%, #00f2fe 100%); color: white; padding: 22px; border-radius: 14px; text-align: center;">
          <div style="font-size: 11px; text-transform: uppercase; letter-spacing: 1px; opacity: 0.9; font-weight: 700;">Avg Transaction</div>
          <div style="font-size: 28px; font-weight: 800; margin-top: 8px;">₹{avg_service}</div>
        </div>
        <div style="background: linear-gradient(135deg, #43e97b 0%, #38f9d7 100%); color: white; padding: 22px; border-radius: 14px; text-align: center;">
          <div style="font-size: 11px; text-transform: uppercase; letter-spacing: 1px; opacity: 0.9; font-weight: 700;">Busy Hours</div>
          <div style="font-size: 28px; font-weight: 800; margin-top: 8px;">{busy_hours}</div>
        </div>
      </div>

      <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 18px; margin-bottom: 44px;">
        <div style="background: linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%); padding: 24px; border-radius: 14px; border-left: 5px solid #43e97b;">
          <div style="color: #7f8c8d; font-size: 12px; text-transform: uppercase; letter-spacing: 1px; font-weight: 700;">⚡ Peak Hour</div>
          <div style="color: #2c3e50; font-size: 24px; font-weight: 800; margin-top: 8px;">{peak_hour}</div>
          <div style="color: #555; font-size: 14px; margin-top: 4px; font-weight: 600;">₹{peak_revenue} revenue</div>
        </div>
        <div style="background: linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%); padding: 24px; border-radius: 14px; border-left: 5px solid #667eea;">
          <div style="color: #7f8c8d; font-size: 12px; text-transform: uppercase; letter-spacing: 1px; font-weight: 700;">🏆 Top Service</div>
          <div style="color: #2c3e50; font-size: 24px; font-weight: 800; margin-top: 8px;">{top_service}</div>
          <div style="color: #555; font-size: 14px; margin-top: 4px; font-weight: 600;">₹{top_revenue} revenue</div>
        </div>
      </div>

      {comparison_section}

      <div style="margin-bottom: 44px;">
        <h2 style="color: #2c3e50; font-size: 22px; margin: 0 0 18px 0; font-weight: 800;">💳 Payment Analytics</h2>
        <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 18px;">
          {payment_cards}
        </div>
      </div>

      <div style="margin-bottom: 44px;">
        <h2 style="color: #2c3e50; font-size: 22px; margin: 0 0 18px 0; font-weight: 800;">🛠️ Service Performance</h2>
        <div style="background: white; border-radius: 14px; overflow: hidden; box-shadow: 0 4px 16px rgba(0,0,0,0.1); border: 1px solid #e9ecef;">
          <table style="width: 100%; border-collapse: collapse;">
            <thead>
              <tr style="background: linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%);">
                <th style="padding: 16px; text-align: left; font-size: 12px; color: #7f8c8d; text-transform: uppercase; letter-spacing: 1px;">Service</th>
                <th style="padding: 16px; text-align: center; font-size: 12px; color: #7f8c8d; text-transform: uppercase; letter-spacing: 1px;">Count</th>
                <th style="padding: 16px; text-align: right; font-size: 12px; color: #7f8c8d; text-transform: uppercase; letter-spacing: 1px;">Revenue</th>
                <th style="padding: 16px; text-align: right; font-size: 12px; color: #7f8c8d; text-transform: uppercase; letter-spacing: 1px;">Avg</th>
                <th style="padding: 16px; text-align: left; font-size: 12px; color: #7f8c8d; text-transform: uppercase; letter-spacing: 1px; width: 25%;">Share</th>
              </tr>
            </thead>
            <tbody>
              {service_rows}
            </tbody>
          </table>
        </div>
      </div>

      <div style="margin-bottom: 44px;">
        <h2 style="color: #2c3e50; font-size: 22px; margin: 0 0 18px 0; font-weight: 800;">🚗 Vehicle Type Mix</h2>
        <div style="background: white; padding: 26px; border-radius: 14px; box-shadow: 0 4px 16px rgba(0,0,0,0.1); border: 1px solid #e9ecef;">
          {vehicle_bars}
        </div>
      </div>

      <div style="margin-bottom: 44px;">
        <h2 style="color: #2c3e50; font-size: 22px; margin: 0 0 18px 0; font-weight: 800;">⏰ Hourly Revenue Performance</h2>
        <div style="background: white; padding: 26px; border-radius: 14px; box-shadow: 0 4px 16px rgba(0,0,0,0.1); border: 1px solid #e9ecef; overflow-x: auto;">
          <div style="display: flex; gap: 10px; min-width: 640px;">
            {hourly_bars}
          </div>
        </div>
      </div>

      <div style="background: linear-gradient(135deg, #1a202c 0%, #2d3748 100%); color: white; padding: 26px; border-radius: 14px; text-align: center;">
        <p style="margin: 0; font-size: 14px; line-height: 1.7; opacity: 0.9;">
          📎 <strong>Data Exports:</strong> transaction report, payment analytics and service performance CSVs are attached for deeper analysis.
        </p>
      </div>

    </div>

    <div style="background-color: #f8f9fa; padding: 24px 36px; border-top: 1px solid #e9ecef; text-align: center;">
      <p style="margin: 0; color: #6c757d; font-size: 13px;">Report generated on {generated_at}</p>
    </div>

  </div>
</body>
</html>
"#,
        date = view.date_label,
        location = escape_html(view.location_name),
        total_revenue = group_thousands(analysis.total_revenue),
        total_vehicles = analysis.total_vehicles,
        avg_service = analysis.avg_service.round() as i64,
        busy_hours = analysis.busy_hour_count,
        peak_hour = peak_hour_label,
        peak_revenue = group_thousands(peak_hour_revenue),
        top_service = top_service_label,
        top_revenue = group_thousands(top_service_revenue),
        generated_at = view.generated_at,
    )
}
