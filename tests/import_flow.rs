use std::io::Write;

use nutrimport::db::Database;
use nutrimport::import::{run_import_file, ImportError, ImportOptions};
use nutrimport::models::Product;

const DATASET: &str = "\
Food_Item,Category,Calories (kcal),Protein (g),Carbohydrates (g),Fat (g),Fiber (g),Sugars (g)
Yogurt (plain, 1 cup),Dairy,150,8,12,4,0,12
Egg (1 egg),Protein,78,6,0.6,5,0,0.6
Brown Rice,Grain,108,2.5,22,0.9,1.8,0.4
Broken row,Snack,100
Whey Isolate (1 oz),Supplement,110,25,3,1,0,1
";

fn setup() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let database = Database::open(dir.path().join("products.db")).unwrap();
    (dir, database)
}

fn write_dataset(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn imports_normalized_products() {
    let (dir, database) = setup();
    let path = write_dataset(&dir, "foods.csv", DATASET);

    let report = run_import_file(&database, &path, &ImportOptions::default()).unwrap();
    assert_eq!(report.rows_found, 5);
    assert_eq!(report.prepared, 4);
    assert_eq!((report.imported, report.skipped, report.errors), (4, 0, 0));

    database
        .with_conn(|conn| {
            let id = Product::find_id_by_name(conn, "yogurt")?.expect("yogurt stored");
            let yogurt = Product::get_by_id(conn, id)?.unwrap();
            assert_eq!(yogurt.name, "Yogurt");
            assert_eq!(yogurt.category, "Dairy");
            assert_eq!(yogurt.kcal_100, 63);
            assert_eq!(yogurt.protein_100, 3.3);
            assert!(yogurt.is_verified);
            assert_eq!(yogurt.added_by_user_id, None);

            // 50g egg
            let id = Product::find_id_by_name(conn, "EGG")?.unwrap();
            let egg = Product::get_by_id(conn, id)?.unwrap();
            assert_eq!(egg.kcal_100, 156);
            assert_eq!(egg.protein_100, 12.0);

            // 28g serving of whey goes over 100g of macros and gets rescaled
            let id = Product::find_id_by_name(conn, "whey isolate")?.unwrap();
            let whey = Product::get_by_id(conn, id)?.unwrap();
            let sum = whey.protein_100 + whey.carbs_100 + whey.fat_100;
            assert!(sum <= 100.0);
            let atwater = whey.protein_100 * 4.0 + whey.carbs_100 * 4.0 + whey.fat_100 * 9.0;
            assert_eq!(whey.kcal_100, atwater.round() as i64);

            assert_eq!(Product::count(conn, None)?, 4);
            Ok(())
        })
        .unwrap();
}

#[test]
fn second_import_skips_existing_names() {
    let (dir, database) = setup();
    let path = write_dataset(&dir, "foods.csv", DATASET);
    let options = ImportOptions::default();

    let first = run_import_file(&database, &path, &options).unwrap();
    assert_eq!(first.imported, 4);

    let renamed = write_dataset(&dir, "again.csv", &DATASET.to_lowercase());
    let second = run_import_file(&database, &renamed, &options).unwrap();
    assert_eq!((second.imported, second.skipped, second.errors), (0, 4, 0));

    let total = database.with_conn(|conn| Product::count(conn, None)).unwrap();
    assert_eq!(total, 4);
}

#[test]
fn dry_run_stores_nothing() {
    let (dir, database) = setup();
    let path = write_dataset(&dir, "foods.csv", DATASET);
    let options = ImportOptions {
        dry_run: true,
        ..ImportOptions::default()
    };

    let report = run_import_file(&database, &path, &options).unwrap();
    assert_eq!(report.prepared, 4);
    assert_eq!(report.imported, 0);

    let total = database.with_conn(|conn| Product::count(conn, None)).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn missing_input_aborts_before_any_row() {
    let (dir, database) = setup();
    let err = run_import_file(&database, &dir.path().join("missing.csv"), &ImportOptions::default())
        .unwrap_err();

    assert!(matches!(err, ImportError::Read { .. }));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn reimport_with_accented_names_skips_existing() {
    let (dir, database) = setup();
    let content = "name,category,kcal,protein,carbs,fat\n\
        Crème Brûlée,Dessert,300,5,30,15\n\
        Żurek (1 cup),Meal,120,4,10,6\n";
    let path = write_dataset(&dir, "desserts.csv", content);
    let options = ImportOptions::default();

    let first = run_import_file(&database, &path, &options).unwrap();
    assert_eq!((first.imported, first.skipped), (2, 0));

    let upper = write_dataset(&dir, "desserts_upper.csv", &content.to_uppercase());
    let second = run_import_file(&database, &upper, &options).unwrap();
    assert_eq!((second.imported, second.skipped, second.errors), (0, 2, 0));

    let total = database.with_conn(|conn| Product::count(conn, None)).unwrap();
    assert_eq!(total, 2);

    let found = database
        .with_conn(|conn| Product::find_id_by_name(conn, "crème brûlée"))
        .unwrap();
    assert!(found.is_some());
}
