//! Static site content.
//!
//! Branch details, pricing, and FAQ copy for the two regions the site serves.
//! This is deliberately code, not a CMS: the content changes with releases.

use rust_decimal::Decimal;

use hydron_core::{Price, Region};

/// Contact and locale details for a regional branch.
#[derive(Debug, Clone)]
pub struct BranchInfo {
    pub name: &'static str,
    pub location: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
}

/// A package on the pricing page.
#[derive(Debug, Clone)]
pub struct PricingTier {
    pub name: &'static str,
    pub price: Price,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

/// One FAQ entry.
#[derive(Debug, Clone)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Branch details for a region.
#[must_use]
pub const fn branch(region: Region) -> BranchInfo {
    match region {
        Region::Uk => BranchInfo {
            name: "Hydron Marketing UK",
            location: "Aylesbury, Buckinghamshire",
            phone: "+44 1296 123456",
            email: "hello@hydronmarketing.co.uk",
        },
        Region::Us => BranchInfo {
            name: "Hydron Marketing USA",
            location: "Florida",
            phone: "+1 (555) 123-4567",
            email: "hello@hydronmarketing.com",
        },
    }
}

/// Pricing tiers for a region.
#[must_use]
pub fn pricing(region: Region) -> Vec<PricingTier> {
    let currency = region.currency();
    let price = |amount: i64| Price::new(Decimal::from(amount), currency);

    match region {
        Region::Uk => vec![
            PricingTier {
                name: "Template Website",
                price: price(199),
                description: "Start with a proven design, customised for your business.",
                features: &[
                    "Up to 5 pages",
                    "Mobile responsive",
                    "Contact form",
                    "SEO basics included",
                    "2-week turnaround",
                ],
            },
            PricingTier {
                name: "Custom Website",
                price: price(349),
                description: "Fully bespoke design tailored to your brand.",
                features: &[
                    "Up to 5 pages",
                    "Custom design",
                    "Mobile responsive",
                    "Contact form",
                    "SEO basics included",
                    "3-week turnaround",
                ],
            },
            PricingTier {
                name: "Small Ecommerce Starter",
                price: price(699),
                description: "Perfect for selling products online.",
                features: &[
                    "Up to 5 pages + shop",
                    "Up to 20 products",
                    "Payment integration",
                    "Mobile responsive",
                    "SEO basics included",
                    "4-week turnaround",
                ],
            },
        ],
        Region::Us => vec![
            PricingTier {
                name: "Template Website",
                price: price(249),
                description: "Start with a proven design, customized for your business.",
                features: &[
                    "Up to 5 pages",
                    "Mobile responsive",
                    "Contact form",
                    "SEO basics included",
                    "2-week turnaround",
                ],
            },
            PricingTier {
                name: "Custom Website",
                price: price(399),
                description: "Fully bespoke design tailored to your brand.",
                features: &[
                    "Up to 5 pages",
                    "Custom design",
                    "Mobile responsive",
                    "Contact form",
                    "SEO basics included",
                    "3-week turnaround",
                ],
            },
            PricingTier {
                name: "Small Ecommerce Starter",
                price: price(799),
                description: "Perfect for selling products online.",
                features: &[
                    "Up to 5 pages + shop",
                    "Up to 20 products",
                    "Payment integration",
                    "Mobile responsive",
                    "SEO basics included",
                    "4-week turnaround",
                ],
            },
        ],
    }
}

/// Frequently asked questions (shared across regions).
#[must_use]
pub const fn faq() -> &'static [FaqItem] {
    &[
        FaqItem {
            question: "How fast can you build it?",
            answer: "Template websites take around 2 weeks, custom designs 3 weeks, and \
                     ecommerce sites about 4 weeks. We show you a draft first so you can \
                     review before we finalize anything.",
        },
        FaqItem {
            question: "What's included in 5 pages?",
            answer: "Typically: Home, About, Services, Gallery/Portfolio, and Contact. You \
                     can adjust this to suit your business needs.",
        },
        FaqItem {
            question: "Can you connect my domain?",
            answer: "Yes, we'll help you point your domain to your new site. If you don't \
                     have a domain yet, we can guide you through purchasing one.",
        },
        FaqItem {
            question: "Can I edit it later?",
            answer: "We provide clear documentation and can show you how to make basic \
                     updates. For bigger changes, we're available for ongoing support.",
        },
        FaqItem {
            question: "What about hosting?",
            answer: "We recommend reliable hosting providers and can help set it up. Hosting \
                     typically costs £5-15/month or $10-20/month depending on your needs.",
        },
        FaqItem {
            question: "What about SEO?",
            answer: "All sites include SEO foundations: proper page titles, meta \
                     descriptions, mobile optimization, and fast loading. This gives you a \
                     solid base to rank in search engines.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydron_core::CurrencyCode;

    #[test]
    fn test_pricing_uses_regional_currency() {
        for tier in pricing(Region::Uk) {
            assert_eq!(tier.price.currency, CurrencyCode::Gbp);
        }
        for tier in pricing(Region::Us) {
            assert_eq!(tier.price.currency, CurrencyCode::Usd);
        }
    }

    #[test]
    fn test_pricing_tier_display() {
        let tiers = pricing(Region::Uk);
        let template = tiers.first().expect("uk has tiers");
        assert_eq!(template.price.to_string(), "£199.00");
    }

    #[test]
    fn test_branches_differ_by_region() {
        assert_ne!(branch(Region::Uk).email, branch(Region::Us).email);
    }
}
