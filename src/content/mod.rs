use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default and maximum page sizes for article listings.
pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const MAX_PAGE_SIZE: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleCategory {
    Markets,
    Planning,
    Platform,
    Basics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u32,
    pub title: &'static str,
    pub summary: &'static str,
    pub category: ArticleCategory,
    /// ISO date; lexicographic order matches chronological order.
    pub published: &'static str,
}

/// Editorial catalog served to the news page. In-memory by design; the site
/// has no persistence layer.
pub fn catalog() -> &'static [Article] {
    &CATALOG
}

static CATALOG: [Article; 12] = [
    Article {
        id: 1,
        title: "What a risk level actually means",
        summary: "How the 1-to-10 dial maps to the mix of assets you hold and the swings you should expect.",
        category: ArticleCategory::Basics,
        published: "2024-11-04",
    },
    Article {
        id: 2,
        title: "Quarterly markets recap",
        summary: "Equities ground higher while bond yields drifted; what moved and why it matters for allocations.",
        category: ArticleCategory::Markets,
        published: "2025-01-10",
    },
    Article {
        id: 3,
        title: "Five questions before you pick a risk level",
        summary: "Horizon, income needs, sleep-at-night factor: a short checklist for the journey's first step.",
        category: ArticleCategory::Planning,
        published: "2024-12-02",
    },
    Article {
        id: 4,
        title: "Inside the growth explorer chart",
        summary: "The curves are illustrative simulations, not forecasts. Here is how to read them honestly.",
        category: ArticleCategory::Platform,
        published: "2025-02-18",
    },
    Article {
        id: 5,
        title: "Why diversification still works",
        summary: "Spreading across equities, bonds and cash remains the one free lunch in investing.",
        category: ArticleCategory::Basics,
        published: "2024-10-21",
    },
    Article {
        id: 6,
        title: "Rate cuts and your bond allocation",
        summary: "Falling rates lift bond prices; what that means for cautious and balanced mixes.",
        category: ArticleCategory::Markets,
        published: "2025-03-05",
    },
    Article {
        id: 7,
        title: "Rebalancing without overthinking it",
        summary: "A once-a-year nudge back to target weights beats constant tinkering.",
        category: ArticleCategory::Planning,
        published: "2025-01-27",
    },
    Article {
        id: 8,
        title: "New: compare allocations side by side",
        summary: "The allocation step now shows how neighbouring risk levels differ at a glance.",
        category: ArticleCategory::Platform,
        published: "2025-04-09",
    },
    Article {
        id: 9,
        title: "Volatility is the price of returns",
        summary: "Higher expected growth comes bundled with wider swings; the chart makes the trade visible.",
        category: ArticleCategory::Basics,
        published: "2025-02-03",
    },
    Article {
        id: 10,
        title: "Earnings season in three charts",
        summary: "Margins held up better than feared; a quick tour of the numbers behind the rally.",
        category: ArticleCategory::Markets,
        published: "2025-04-22",
    },
    Article {
        id: 11,
        title: "Drip-feeding versus lump sum",
        summary: "Investing gradually feels safer and usually costs a little return; the data, plainly.",
        category: ArticleCategory::Planning,
        published: "2025-03-19",
    },
    Article {
        id: 12,
        title: "A calmer way to check your portfolio",
        summary: "Weekly, not hourly: how the app nudges you away from doom-scrolling your balance.",
        category: ArticleCategory::Platform,
        published: "2025-05-06",
    },
];

#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub search: Option<String>,
    pub category: Option<ArticleCategory>,
    /// 1-based; values below 1 are treated as 1.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub items: Vec<Article>,
    pub total: usize,
    pub page: u32,
    pub page_count: u32,
    pub page_size: u32,
}

/// Search, filter and paginate the catalog. Matching is case-insensitive
/// over title and summary; results are ordered newest first.
pub fn query_articles(articles: &[Article], query: &ArticleQuery) -> ArticlePage {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<Article> = articles
        .iter()
        .filter(|a| query.category.is_none_or(|c| a.category == c))
        .filter(|a| {
            needle.as_deref().is_none_or(|n| {
                a.title.to_lowercase().contains(n) || a.summary.to_lowercase().contains(n)
            })
        })
        .copied()
        .collect();
    matched.sort_by(|a, b| b.published.cmp(a.published).then(b.id.cmp(&a.id)));

    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);
    let total = matched.len();
    let page_count = (total as u32).div_ceil(page_size);

    let start = (page - 1) as usize * page_size as usize;
    let items = if start >= total {
        Vec::new()
    } else {
        matched[start..(start + page_size as usize).min(total)].to_vec()
    };

    ArticlePage {
        items,
        total,
        page,
        page_count,
        page_size,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubscribeError {
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("this email address is already subscribed")]
    AlreadySubscribed,
}

/// Newsletter signups. Addresses are normalized to lowercase; duplicates are
/// rejected rather than silently absorbed so the form can tell the user.
#[derive(Debug, Default)]
pub struct SubscriberBook {
    emails: Vec<String>,
}

impl SubscriberBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, email: &str) -> Result<(), SubscribeError> {
        let normalized = email.trim().to_lowercase();
        if !is_valid_email(&normalized) {
            return Err(SubscribeError::InvalidEmail);
        }
        if self.emails.iter().any(|e| e == &normalized) {
            return Err(SubscribeError::AlreadySubscribed);
        }
        self.emails.push(normalized);
        Ok(())
    }

    pub fn contains(&self, email: &str) -> bool {
        let normalized = email.trim().to_lowercase();
        self.emails.iter().any(|e| e == &normalized)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

// Syntactic check only; deliverability is the mail provider's problem.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}
