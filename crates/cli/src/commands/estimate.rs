//! Print a restoration quote.

use std::io::{self, Write};

use kicklabs_core::restoration::{BUNDLE_DISCOUNT_PERCENT, estimate};
use kicklabs_core::{Condition, Price, Service, ServiceSelection};
use tracing::info;

/// Write the itemised quote.
///
/// Basic cleaning is always included.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn quote(out: &mut impl Write, condition: Condition, services: Vec<Service>) -> io::Result<()> {
    let selection = ServiceSelection::with(services);
    let quote = estimate(condition, &selection);
    info!(condition = condition.id(), services = selection.len(), "Quoted restoration");

    writeln!(out, "{:<36} {:>10}", format!("Base cost ({})", condition.label()), quote.base.display())?;
    for service in &quote.services {
        let cost = service.cost();
        let shown = if cost == Price::ZERO { "FREE".to_string() } else { cost.display() };
        writeln!(out, "  {:<34} {shown:>10}", service.label())?;
    }
    if quote.has_discount() {
        writeln!(
            out,
            "{:<36} {:>10}",
            format!("Bundle discount ({BUNDLE_DISCOUNT_PERCENT}% off add-ons)"),
            format!("-{}", quote.discount.display())
        )?;
    }
    writeln!(out, "{:<36} {:>10}", "Total", quote.total.display())?;
    writeln!(out, "Turnaround: {}", quote.turnaround)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_quote() {
        let mut buf = Vec::new();
        quote(&mut buf, Condition::Medium, vec![Service::Deep, Service::Stain, Service::Lace]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Base cost (Medium Dirt)"));
        assert!(text.contains("Basic Cleaning"));
        assert!(text.contains("-NPR 60"));
        assert!(text.lines().any(|l| l.starts_with("Total") && l.ends_with("NPR 1,039")));
        assert!(text.ends_with("Turnaround: 2-3 days\n"));
    }

    #[test]
    fn test_no_discount_below_threshold() {
        let mut buf = Vec::new();
        quote(&mut buf, Condition::Light, vec![Service::Glue]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(!text.contains("Bundle discount"));
        assert!(text.lines().any(|l| l.starts_with("Total") && l.ends_with("NPR 599")));
    }
}
