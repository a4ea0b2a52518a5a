//! Static product catalog
//!
//! Fixed, read-only product list keyed by integer id. Prices are minor
//! currency units.

use crate::models::Product;

/// Product category for storefront grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Phones,
    Shoes,
    Clothing,
}

impl Category {
    fn product_ids(self) -> &'static [u32] {
        match self {
            Self::Phones => &[1, 2, 3, 4],
            Self::Shoes => &[5, 6, 7],
            Self::Clothing => &[8, 9, 10],
        }
    }
}

/// Read-only product lookup.
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The builtin storefront assortment.
    pub fn builtin() -> Self {
        let products = vec![
            product(1, "Apple iPhone 16 Pro Max 256GB", 799_900, "iphone-16-pro-max"),
            product(2, "小米 15 白色", 499_900, "xiaomi-15-white"),
            product(3, "三星Samsung Galaxy S24 Ultra", 646_600, "galaxy-s24-ultra"),
            product(4, "HUAWEI Mate 70", 1_299_900, "huawei-mate-70"),
            product(5, "安踏（ANTA）男鞋板鞋", 14_900, "anta-skate-shoes"),
            product(6, "李宁赤兔6Pro新款跑步鞋", 39_900, "lining-chitu-6-pro"),
            product(7, "回力（Warrior）夏季休闲鞋", 9_900, "warrior-summer-shoes"),
            product(8, "回力纯棉舒适T恤", 5_900, "warrior-cotton-tee"),
            product(9, "真维斯白色卫衣男连帽", 9_900, "jeanswest-white-hoodie"),
            product(10, "WASSUP ERIKA潮牌男装轻熟西装外套", 19_900, "wassup-erika-blazer"),
        ];
        Self { products }
    }

    /// A custom assortment, for tests.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        let ids = category.product_ids();
        self.products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .collect()
    }
}

fn product(id: u32, name: &str, price: i64, slug: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        image: format!("https://img.minimart.example/{slug}.jpg"),
        description: name.to_string(),
    }
}
