use nc_storage::RelatedArticleResolver;

pub struct AppState {
    pub resolver: RelatedArticleResolver,
}
