#![allow(missing_docs)]

use areagraph::{
    AliasHint, Area, AreaGraph, AreaId, FileNameQuery, GraphOptions, Relation, Result, Version,
    GLOBAL_ROOT_ID,
};

struct Portal {
    graph: AreaGraph,
    shop: AreaId,
    blog: AreaId,
    shop_index: AreaId,
    blog_index: AreaId,
    shared_footer: AreaId,
}

/// Two sibling projects, each with an "index" page, sharing a footer below both.
fn build_portal() -> Result<Portal> {
    let mut graph = AreaGraph::with_options(GraphOptions::new().path_separator("/"));

    let shop = graph.add_new_area(
        Area::default()
            .with_alias("shop")
            .with_project_root(true)
            .with_folder("shop"),
    )?;
    let blog = graph.add_new_area(
        Area::default()
            .with_alias("blog")
            .with_project_root(true)
            .with_folder("blog"),
    )?;
    let page = |alias: &str, file: &str| Area::default().with_alias(alias).with_file(file);
    let shop_index = graph.add_new_area(page("index", "index.html"))?;
    let blog_index = graph.add_new_area(page("index", "index.html"))?;
    let shared_footer = graph.add_new_area(page("footer", "footer.html"))?;

    graph.add_subarea(GLOBAL_ROOT_ID, shop, Relation::inheriting())?;
    graph.add_subarea(GLOBAL_ROOT_ID, blog, Relation::inheriting())?;
    graph.add_subarea(shop, shop_index, Relation::inheriting())?;
    graph.add_subarea(blog, blog_index, Relation::inheriting())?;
    graph.add_subarea(shop_index, shared_footer, Relation::inheriting())?;
    graph.add_subarea(blog_index, shared_footer, Relation::inheriting())?;

    Ok(Portal {
        graph,
        shop,
        blog,
        shop_index,
        blog_index,
        shared_footer,
    })
}

#[test]
fn sibling_projects_resolve_their_own_alias() -> Result<()> {
    let portal = build_portal()?;
    let graph = &portal.graph;

    let from_shop = graph.get_area_from_area(portal.shop_index, "index", AliasHint::First);
    assert_eq!(from_shop.map(Area::id), Some(portal.shop_index));

    let from_blog = graph.get_area_from_area(portal.blog_index, "index", AliasHint::First);
    assert_eq!(from_blog.map(Area::id), Some(portal.blog_index));

    assert_eq!(
        graph.get_area_global("index", AliasHint::Last).map(Area::id),
        Some(portal.blog_index)
    );
    Ok(())
}

#[test]
fn shared_area_sees_both_projects_in_discovery_order() -> Result<()> {
    let portal = build_portal()?;
    let graph = &portal.graph;

    assert_eq!(
        graph.get_project_root_areas(portal.shared_footer),
        vec![portal.shop, portal.blog]
    );
    let found = graph.get_area_from_area(portal.shared_footer, "index", AliasHint::First);
    assert_eq!(found.map(Area::id), Some(portal.shop_index));
    Ok(())
}

#[test]
fn alias_may_repeat_across_projects_but_not_within_one() -> Result<()> {
    let mut portal = build_portal()?;

    assert!(portal.graph.is_area_alias_unique(Some("index"), portal.shop_index));

    let extra = portal.graph.add_new_area(Area::default())?;
    portal
        .graph
        .add_subarea(portal.shop, extra, Relation::inheriting())?;
    assert!(!portal.graph.is_area_alias_unique(Some("index"), extra));
    assert!(portal.graph.is_area_alias_unique(Some("about"), extra));
    assert!(!portal.graph.is_area_alias_unique(Some("footer"), portal.blog));
    Ok(())
}

#[test]
fn shared_footer_file_resolves_through_nearest_project_folder() -> Result<()> {
    let mut portal = build_portal()?;

    assert_eq!(
        portal.graph.get_area_file_name(portal.shared_footer).as_deref(),
        Some("shop/footer.html")
    );
    let query = FileNameQuery::new(0).omit(portal.shop_index);
    assert_eq!(
        portal
            .graph
            .get_area_full_file_name(portal.shared_footer, &query)
            .as_deref(),
        Some("blog/footer.html")
    );

    portal.graph.set_versions(vec![Version {
        id: 1,
        alias: "print".into(),
        description: String::new(),
        start_area_id: Some(portal.blog),
    }]);
    portal.graph.area_mut(portal.blog).unwrap().version_id = 1;
    let print = FileNameQuery::new(1);
    assert_eq!(
        portal
            .graph
            .get_area_full_file_name(portal.shared_footer, &print)
            .as_deref(),
        Some("blog/footer.html")
    );
    Ok(())
}
