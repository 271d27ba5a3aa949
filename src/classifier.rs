// src/classifier.rs
use serde::Serialize;
use url::Url;

/// URLs bucketed by the leading path segment. Buckets are mutually
/// exclusive and exhaustive over the input; order within a bucket is input
/// order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct LinkClassification {
    pub home: Vec<String>,
    pub pages: Vec<String>,
    pub policies: Vec<String>,
    pub blogs: Vec<String>,
    pub collections: Vec<String>,
    pub products: Vec<String>,
    pub others: Vec<String>,
}

impl LinkClassification {
    pub fn total(&self) -> usize {
        self.home.len()
            + self.pages.len()
            + self.policies.len()
            + self.blogs.len()
            + self.collections.len()
            + self.products.len()
            + self.others.len()
    }
}

pub fn classify_links<'a, I>(links: I, root_domain: &str) -> LinkClassification
where
    I: IntoIterator<Item = &'a str>,
{
    let mut classification = LinkClassification::default();

    for link in links {
        let bucket = match categorize(link, root_domain) {
            Category::Home => &mut classification.home,
            Category::Pages => &mut classification.pages,
            Category::Policies => &mut classification.policies,
            Category::Blogs => &mut classification.blogs,
            Category::Collections => &mut classification.collections,
            Category::Products => &mut classification.products,
            Category::Others => &mut classification.others,
        };
        bucket.push(link.to_string());
    }

    classification
}

enum Category {
    Home,
    Pages,
    Policies,
    Blogs,
    Collections,
    Products,
    Others,
}

fn categorize(link: &str, root_domain: &str) -> Category {
    let parsed = match Url::parse(link) {
        Ok(parsed) => parsed,
        // Unparseable input still needs a bucket
        Err(_) => return Category::Others,
    };

    let host = parsed.host_str().unwrap_or("");
    if !root_domain.is_empty() && !host.ends_with(root_domain) {
        return Category::Others;
    }

    let path = parsed.path().to_lowercase();
    let path = path.strip_suffix('/').unwrap_or(&path);

    if host == root_domain && path.is_empty() {
        return Category::Home;
    }

    // First non-empty segment; an absolute path contributes one leading
    // empty segment to skip
    let mut segments = path.split('/');
    let first = match segments.next() {
        Some("") => segments.next().unwrap_or(""),
        Some(seg) => seg,
        None => "",
    };

    match first {
        "pages" | "page" => Category::Pages,
        "policies" | "policy" => Category::Policies,
        "blogs" | "blog" => Category::Blogs,
        "collections" | "collection" => Category::Collections,
        "products" | "product" => Category::Products,
        _ => Category::Others,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_by_first_segment() {
        let links = [
            "https://example.com/",
            "https://example.com/pages/about",
            "https://example.com/page/contact",
            "https://example.com/policies/privacy",
            "https://example.com/policy/terms",
            "https://example.com/blogs/news",
            "https://example.com/blog/latest",
            "https://example.com/collections/shoes",
            "https://example.com/collection/summer",
            "https://example.com/products/shirt",
            "https://example.com/product/123",
            "https://example.com/cart",
            "https://example.com/account/login",
        ];
        let result = classify_links(links, "example.com");

        assert_eq!(result.home, vec!["https://example.com/"]);
        assert_eq!(
            result.pages,
            vec!["https://example.com/pages/about", "https://example.com/page/contact"]
        );
        assert_eq!(result.policies.len(), 2);
        assert_eq!(result.blogs.len(), 2);
        assert_eq!(result.collections.len(), 2);
        assert_eq!(result.products.len(), 2);
        assert_eq!(
            result.others,
            vec!["https://example.com/cart", "https://example.com/account/login"]
        );
    }

    #[test]
    fn test_buckets_are_exhaustive_and_exclusive() {
        let links = [
            "https://example.com/",
            "https://example.com/pages/",
            "https://sub.example.com/",
            "https://example.org/",
            "https://www.example.com/",
            "not a url",
        ];
        let result = classify_links(links, "example.com");

        assert_eq!(result.total(), links.len());
        assert_eq!(result.home, vec!["https://example.com/"]);
        assert_eq!(result.pages, vec!["https://example.com/pages/"]);
        // Subdomain roots are on-domain but not Home
        assert!(result.others.contains(&"https://sub.example.com/".to_string()));
        assert!(result.others.contains(&"https://example.org/".to_string()));
        assert!(result.others.contains(&"https://www.example.com/".to_string()));
        assert!(result.others.contains(&"not a url".to_string()));
    }

    #[test]
    fn test_off_domain_goes_to_others() {
        let result = classify_links(["https://other.org/pages/about"], "example.com");
        assert_eq!(result.others, vec!["https://other.org/pages/about"]);
        assert!(result.pages.is_empty());
    }

    #[test]
    fn test_query_does_not_affect_category() {
        let result = classify_links(
            ["https://example.com/pages/contact?lang=fr", "https://example.com/search?q=test"],
            "example.com",
        );
        assert_eq!(result.pages, vec!["https://example.com/pages/contact?lang=fr"]);
        assert_eq!(result.others, vec!["https://example.com/search?q=test"]);
    }

    #[test]
    fn test_empty_input() {
        let links: [&str; 0] = [];
        let result = classify_links(links, "example.com");
        assert_eq!(result, LinkClassification::default());
    }
}
