//! Template 2 — enhanced cards and CSS bars

use super::{ReportView, escape_html};
use crate::util::group_thousands;

pub fn render(view: &ReportView<'_>) -> String {
    let analysis = view.analysis;

    let mut payment_cards = String::new();
    for item in &analysis.payment_breakdown {
        let upi_details = if item.upi_accounts.is_empty() {
            String::new()
        } else {
            let mut upi_items = String::new();
            for account in &item.upi_accounts {
                upi_items.push_str(&format!(
                    r#"<div style="padding: 8px 12px; background-color: #e3f2fd; border-radius: 4px; margin-top: 8px;"><span style="font-weight: 600; color: #1976d2;">{name}</span><br><span style="font-size: 13px; color: #666;">₹{amount} • {count} vehicles</span></div>"#,
                    name = escape_html(&account.name),
                    amount = group_thousands(account.amount),
                    count = account.count,
                ));
            }
            format!(
                r#"<div style="margin-top: 12px; padding-top: 12px; border-top: 1px solid #e0e0e0;"><strong style="color: #555; font-size: 14px;">UPI Breakdown:</strong>{upi_items}</div>"#,
            )
        };

        payment_cards.push_str(&format!(
            r#"<div style="background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.08); border-left: 4px solid #667eea;">
          <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px;">
            <h3 style="margin: 0; color: #333; font-size: 18px;">{mode}</h3>
            <span style="background-color: #667eea; color: white; padding: 4px 12px; border-radius: 12px; font-size: 12px; font-weight: 600;">{pct:.1}%</span>
          </div>
          <div style="display: flex; justify-content: space-between; color: #666; font-size: 14px;">
            <div>
              <span style="color: #999; font-size: 12px;">Revenue</span><br>
              <strong style="color: #333; font-size: 20px;">₹{revenue}</strong>
            </div>
            <div style="text-align: right;">
              <span style="color: #999; font-size: 12px;">Vehicles</span><br>
              <strong style="color: #333; font-size: 20px;">{count}</strong>
            </div>
          </div>
          {upi_details}
        </div>
"#,
            mode = escape_html(&item.mode),
            pct = item.percentage,
            revenue = group_thousands(item.revenue),
            count = item.count,
        ));
    }

    let mut service_cards = String::new();
    for item in &analysis.service_breakdown {
        service_cards.push_str(&format!(
            r#"<div style="background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.08); border-left: 4px solid #f093fb;">
          <h3 style="margin: 0 0 12px 0; color: #333; font-size: 18px;">{service}</h3>
          <div style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px; color: #666; font-size: 14px;">
            <div>
              <span style="color: #999; font-size: 12px;">Count</span><br>
              <strong style="color: #333; font-size: 18px;">{count}</strong>
            </div>
            <div>
              <span style="color: #999; font-size: 12px;">Revenue</span><br>
              <strong style="color: #333; font-size: 18px;">₹{revenue}</strong>
            </div>
            <div>
              <span style="color: #999; font-size: 12px;">Avg Price</span><br>
              <strong style="color: #333; font-size: 18px;">₹{avg}</strong>
            </div>
          </div>
        </div>
"#,
            service = escape_html(&item.service),
            count = item.count,
            revenue = group_thousands(item.revenue),
            avg = item.average_price.round() as i64,
        ));
    }

    let mut vehicle_bars = String::new();
    for item in &analysis.vehicle_distribution {
        vehicle_bars.push_str(&format!(
            r#"<div style="margin-bottom: 16px;">
          <div style="display: flex; justify-content: space-between; margin-bottom: 4px;">
            <span style="font-weight: 600; color: #333;">{vtype}</span>
            <span style="color: #666;">{count} vehicles ({pct:.1}%)</span>
          </div>
          <div style="background-color: #e0e0e0; height: 8px; border-radius: 4px; overflow: hidden;">
            <div style="background: linear-gradient(90deg, #4facfe 0%, #00f2fe 100%); height: 100%; width: {pct}%; border-radius: 4px;"></div>
          </div>
        </div>
"#,
            vtype = escape_html(&item.vehicle_type),
            count = item.count,
            pct = item.percentage,
        ));
    }

    // Proportional CSS bars against the busiest hour.
    let max_amount = analysis
        .hourly_breakdown
        .iter()
        .map(|h| h.amount)
        .max()
        .unwrap_or(1)
        .max(1);
    let mut hourly_bars = String::new();
    for item in &analysis.hourly_breakdown {
        let bar_height = (item.amount.max(0) as f64 / max_amount as f64 * 100.0).clamp(0.0, 100.0);
        hourly_bars.push_str(&format!(
            r#"<div style="flex: 1; min-width: 60px; text-align: center;">
          <div style="height: 100px; display: flex; align-items: flex-end; justify-content: center; margin-bottom: 8px;">
            <div style="width: 100%; background: linear-gradient(180deg, #667eea 0%, #764ba2 100%); border-radius: 4px 4px 0 0; height: {bar_height:.0}%; min-height: 2px;"></div>
          </div>
          <div style="font-size: 11px; color: #666; margin-bottom: 2px;">{display}</div>
          <div style="font-size: 10px; color: #999;">{count}v</div>
          <div style="font-size: 11px; font-weight: 600; color: #333;">₹{amount}</div>
        </div>
"#,
            display = item.display,
            count = item.count,
            amount = group_thousands(item.amount),
        ));
    }

    let comparison_section = if view.comparison.len() > 1 {
        let mut rows = String::new();
        for share in view.comparison {
            rows.push_str(&format!(
                r#"<div style="margin-bottom: 16px;">
          <div style="display: flex; justify-content: space-between; margin-bottom: 4px;">
            <span style="font-weight: 600; color: #333;">{name}</span>
            <span style="color: #666;">₹{revenue} • {vehicles} vehicles ({pct:.1}%)</span>
          </div>
          <div style="background-color: #e0e0e0; height: 8px; border-radius: 4px; overflow: hidden;">
            <div style="background: linear-gradient(90deg, #667eea 0%, #764ba2 100%); height: 100%; width: {pct}%; border-radius: 4px;"></div>
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
            r#"<div style="margin-bottom: 40px;">
        <h2 style="color: #333; font-size: 24px; margin: 0 0 20px 0; font-weight: 700;">🏢 Location Comparison</h2>
        <div style="background: white; padding: 24px; border-radius: 12px; box-shadow: 0 2px 4px rgba(0,0,0,0.08);">
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
  <title>Enhanced Daily Report</title>
</head>
<body style="margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f0f2f5;">
  <div style="max-width: 800px; margin: 40px auto; background-color: #ffffff; border-radius: 12px; overflow: hidden; box-shadow: 0 4px 16px rgba(0,0,0,0.1);">

    <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 40px 32px; text-align: center;">
      <h1 style="margin: 0; font-size: 36px; font-weight: 700;">📊 Daily Business Report</h1>
      <p style="margin: 12px 0 0 0; font-size: 18px; opacity: 0.95;">{date}</p>
      <p style="margin: 4px 0 0 0; font-size: 15px; opacity: 0.85;">📍 {location}</p>
    </div>

    <div style="padding: 32px;">

      <div style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 20px; margin-bottom: 40px;">
        <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 24px; border-radius: 12px; text-align: center; box-shadow: 0 4px 8px rgba(102, 126, 234, 0.3);">
          <p style="margin: 0; font-size: 13px; opacity: 0.9; text-transform: uppercase; letter-spacing: 1px; font-weight: 600;">Total Revenue</p>
          <h2 style="margin: 12px 0 0 0; font-size: 32px; font-weight: 800;">₹{total_revenue}</h2>
        </div>
        <div style="background: linear-gradient(135deg, #f093fb 0%, #f5576c 100%); color: white; padding: 24px; border-radius: 12px; text-align: center; box-shadow: 0 4px 8px rgba(240, 147, 251, 0.3);">
          <p style="margin: 0; font-size: 13px; opacity: 0.9; text-transform: uppercase; letter-spacing: 1px; font-weight: 600;">Vehicles</p>
          <h2 style="margin: 12px 0 0 0; font-size: 32px; font-weight: 800;">{total_vehicles}</h2>
        </div>
        <div style="background: linear-gradient(135deg, #4facfe 0%, #00f2fe 100%); color: white; padding: 24px; border-radius: 12px; text-align: center; box-shadow: 0 4px 8px rgba(79, 172, 254, 0.3);">
          <p style="margin: 0; font-size: 13px; opacity: 0.9; text-transform: uppercase; letter-spacing: 1px; font-weight: 600;">Avg Service</p>
          <h2 style="margin: 12px 0 0 0; font-size: 32px; font-weight: 800;">₹{avg_service}</h2>
        </div>
      </div>

      {comparison_section}

      <div style="margin-bottom: 40px;">
        <h2 style="color: #333; font-size: 24px; margin: 0 0 20px 0; font-weight: 700;">💳 Payment Breakdown</h2>
        <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 16px;">
          {payment_cards}
        </div>
      </div>

      <div style="margin-bottom: 40px;">
        <h2 style="color: #333; font-size: 24px; margin: 0 0 20px 0; font-weight: 700;">🛠️ Service Performance</h2>
        <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 16px;">
          {service_cards}
        </div>
      </div>

      <div style="margin-bottom: 40px;">
        <h2 style="color: #333; font-size: 24px; margin: 0 0 20px 0; font-weight: 700;">🚗 Vehicle Distribution</h2>
        <div style="background: white; padding: 24px; border-radius: 12px; box-shadow: 0 2px 4px rgba(0,0,0,0.08);">
          {vehicle_bars}
        </div>
      </div>

      <div style="margin-bottom: 40px;">
        <h2 style="color: #333; font-size: 24px; margin: 0 0 20px 0; font-weight: 700;">⏰ Hourly Performance</h2>
        <div style="background: white; padding: 24px; border-radius: 12px; box-shadow: 0 2px 4px rgba(0,0,0,0.08); overflow-x: auto;">
          <div style="display: flex; gap: 8px; min-width: 600px;">
            {hourly_bars}
          </div>
        </div>
      </div>

      <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 24px; border-radius: 12px; text-align: center;">
        <p style="margin: 0; font-size: 15px; line-height: 1.6;">
          📎 <strong>Attachments Included:</strong> This email contains 3 detailed CSV reports with complete transaction data, payment analytics, and service breakdowns.
        </p>
      </div>

    </div>

    <div style="background-color: #f8f9fa; padding: 24px 32px; border-top: 1px solid #e9ecef; text-align: center;">
      <p style="margin: 0; color: #6c757d; font-size: 13px;">
        Report generated on {generated_at}
      </p>
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
        generated_at = view.generated_at,
    )
}
