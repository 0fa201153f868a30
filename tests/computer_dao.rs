use chrono::NaiveDate;
use computer_database::dao::{CompanyDao, ComputerDao, Dao, DaoError};
use computer_database::db::open_in_memory;
use computer_database::model::{Company, Computer, Direction, Order, PageParameters};
use sqlx::SqlitePool;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn setup() -> (SqlitePool, ComputerDao, CompanyDao) {
    let pool = open_in_memory().await.unwrap();
    (
        pool.clone(),
        ComputerDao::new(pool.clone()),
        CompanyDao::new(pool),
    )
}

async fn seed(dao: &ComputerDao, names: &[&str]) -> Vec<Computer> {
    let mut created = Vec::new();
    for name in names {
        created.push(dao.create(Computer::new(*name)).await.unwrap());
    }
    created
}

#[tokio::test]
async fn create_reads_back_generated_id() {
    let (_pool, computers, companies) = setup().await;
    let apple = companies.create(Company::new(0, "Apple Inc.")).await.unwrap();

    let mut computer = Computer::new("Macintosh 128K");
    computer.introduced = Some(date(1984, 1, 24));
    computer.company = Some(apple.clone());

    let created = computers.create(computer).await.unwrap();
    assert!(created.id > 0);

    let loaded = computers.find(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Macintosh 128K");
    assert_eq!(loaded.introduced, Some(date(1984, 1, 24)));
    assert_eq!(loaded.discontinued, None);
    assert_eq!(loaded.company, Some(apple));
}

#[tokio::test]
async fn consecutive_creates_get_distinct_ids() {
    let (_pool, computers, _companies) = setup().await;
    let created = seed(&computers, &["A", "B"]).await;
    assert_ne!(created[0].id, created[1].id);
}

#[tokio::test]
async fn find_missing_returns_none() {
    let (_pool, computers, _companies) = setup().await;
    assert!(computers.find(4242).await.unwrap().is_none());
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let (_pool, computers, companies) = setup().await;
    let ibm = companies.create(Company::new(0, "IBM")).await.unwrap();
    let mut computer = computers.create(Computer::new("PC")).await.unwrap();

    computer.name = "IBM PC".to_string();
    computer.introduced = Some(date(1981, 8, 12));
    computer.discontinued = Some(date(1987, 4, 2));
    computer.company = Some(ibm.clone());
    computers.update(computer.clone()).await.unwrap();

    let loaded = computers.find(computer.id).await.unwrap().unwrap();
    assert_eq!(loaded, computer);

    computer.company = None;
    computers.update(computer.clone()).await.unwrap();
    let loaded = computers.find(computer.id).await.unwrap().unwrap();
    assert_eq!(loaded.company, None);
}

#[tokio::test]
async fn update_missing_is_not_found() {
    let (_pool, computers, _companies) = setup().await;
    let mut ghost = Computer::new("ghost");
    ghost.id = 99;

    let err = computers.update(ghost).await.unwrap_err();
    assert!(matches!(err, DaoError::NotFound { entity: "computer", id: 99 }));
}

#[tokio::test]
async fn delete_removes_row_once() {
    let (_pool, computers, _companies) = setup().await;
    let created = seed(&computers, &["Altair 8800"]).await;
    let id = created[0].id;

    computers.delete(id).await.unwrap();
    assert!(computers.find(id).await.unwrap().is_none());

    let err = computers.delete(id).await.unwrap_err();
    assert!(matches!(err, DaoError::NotFound { .. }));
}

#[tokio::test]
async fn delete_all_binds_each_id() {
    let (_pool, computers, _companies) = setup().await;
    let created = seed(&computers, &["A", "B", "C", "D"]).await;

    let deleted = computers
        .delete_all(&[created[0].id, created[2].id, 12345])
        .await
        .unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(computers.count().await.unwrap(), 2);

    assert_eq!(computers.delete_all(&[]).await.unwrap(), 0);
}

#[tokio::test]
async fn find_page_applies_offset_and_size() {
    let (_pool, computers, _companies) = setup().await;
    seed(&computers, &["a1", "a2", "a3", "a4", "a5"]).await;

    let page = PageParameters::new(1, 2);
    let names: Vec<_> = computers
        .find_page(&page)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["a3", "a4"]);

    let last = computers.find_page(&PageParameters::new(2, 2)).await.unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].name, "a5");

    let past_end = computers.find_page(&PageParameters::new(3, 2)).await.unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn find_page_with_huge_page_number_is_empty() {
    let (_pool, computers, _companies) = setup().await;
    seed(&computers, &["only"]).await;

    let found = computers
        .find_page(&PageParameters::new(u32::MAX, u32::MAX))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn find_page_filters_by_name_prefix() {
    let (_pool, computers, _companies) = setup().await;
    seed(
        &computers,
        &["MacBook", "Macintosh", "Amiga", "mac mini", "100%_real"],
    )
    .await;

    let page = PageParameters::new(0, 10).searching("mac");
    let found = computers.find_page(&page).await.unwrap();
    let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["MacBook", "Macintosh", "mac mini"]);
    assert_eq!(computers.count_matching(&page).await.unwrap(), 3);

    // LIKE metacharacters in the search are literal
    let page = PageParameters::new(0, 10).searching("100%_");
    assert_eq!(computers.count_matching(&page).await.unwrap(), 1);
    let page = PageParameters::new(0, 10).searching("%");
    assert_eq!(computers.count_matching(&page).await.unwrap(), 0);
}

#[tokio::test]
async fn find_page_sorts_by_each_column() {
    let (_pool, computers, _companies) = setup().await;

    for (name, introduced, discontinued) in [
        ("B", date(1990, 1, 1), date(1995, 1, 1)),
        ("A", date(1980, 1, 1), date(2000, 1, 1)),
        ("C", date(1985, 1, 1), date(1986, 1, 1)),
    ] {
        let mut computer = Computer::new(name);
        computer.introduced = Some(introduced);
        computer.discontinued = Some(discontinued);
        computers.create(computer).await.unwrap();
    }

    let sorted = |order, direction| {
        let computers = computers.clone();
        async move {
            computers
                .find_page(&PageParameters::new(0, 10).ordered(order, direction))
                .await
                .unwrap()
                .into_iter()
                .map(|c| c.name)
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(sorted(Order::Name, Direction::Asc).await, ["A", "B", "C"]);
    assert_eq!(sorted(Order::Name, Direction::Desc).await, ["C", "B", "A"]);
    assert_eq!(sorted(Order::Introduced, Direction::Asc).await, ["A", "C", "B"]);
    assert_eq!(
        sorted(Order::Discontinued, Direction::Desc).await,
        ["A", "B", "C"]
    );
}

#[tokio::test]
async fn find_page_keeps_computers_without_company() {
    let (_pool, computers, companies) = setup().await;
    let commodore = companies.create(Company::new(0, "Commodore")).await.unwrap();

    let mut c64 = Computer::new("C64");
    c64.company = Some(commodore.clone());
    computers.create(c64).await.unwrap();
    computers.create(Computer::new("Homebrew")).await.unwrap();

    let page = computers.find_page(&PageParameters::new(0, 10)).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].company, Some(commodore));
    assert_eq!(page[1].company, None);
}

#[tokio::test]
async fn delete_by_company_id_joins_transaction() {
    let (pool, computers, companies) = setup().await;
    let atari = companies.create(Company::new(0, "Atari")).await.unwrap();

    for name in ["Atari ST", "Atari 800"] {
        let mut computer = Computer::new(name);
        computer.company = Some(atari.clone());
        computers.create(computer).await.unwrap();
    }
    computers.create(Computer::new("Unrelated")).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let removed = computers
        .delete_by_company_id(&mut *tx, atari.id)
        .await
        .unwrap();
    assert_eq!(removed, 2);
    tx.rollback().await.unwrap();

    assert_eq!(computers.count().await.unwrap(), 3);
}

#[tokio::test]
async fn find_all_lists_in_insertion_order() {
    let (_pool, computers, _companies) = setup().await;
    seed(&computers, &["Z", "Y"]).await;

    let all = computers.find_all().await.unwrap();
    let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Z", "Y"]);
}
